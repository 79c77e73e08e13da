use imposter::{
    verify_transcript, CategorySet, FixedSeedSource, GameAction, GameSession, GameState,
    GameTranscript, Phase, SetupPatch,
};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        dealing_twelve_players,
        playing_full_game,
        verifying_full_game,
}

fn started(seed: u32) -> GameState {
    let categories = CategorySet::builtin();
    let state = imposter::reduce(
        &GameState::new(),
        &GameAction::SetupUpdate(SetupPatch::categories(categories.names()).with_seed(seed)),
    );
    let state = imposter::reduce(&state, &GameAction::SetupUpdate(SetupPatch::counts(12, 3)));
    imposter::reduce(
        &state,
        &GameAction::GameStart {
            categories: categories.as_slice().to_vec(),
        },
    )
}

fn full_game(seed: u32) -> GameTranscript {
    let mut session = GameSession::with_seed_source(GameState::new(), FixedSeedSource(seed));
    let names = session.categories().names();
    session.dispatch(GameAction::SetupUpdate(SetupPatch::categories(names)));
    session.dispatch(GameAction::SetupUpdate(SetupPatch::counts(12, 3)));
    session.start();
    while session.state().phase == Phase::Reveal {
        session.dispatch(GameAction::RevealNext);
    }
    while session.state().phase == Phase::Discussion {
        session.dispatch(GameAction::DiscussionStartVoting);
        while let Some(voter) = session.state().current_voter() {
            let target = session.state().eligible_targets()[0];
            session.dispatch(GameAction::VoteCast { voter, target });
            session.dispatch(GameAction::VotingConfirmNext);
        }
    }
    session.into_transcript()
}

fn dealing_twelve_players(c: &mut criterion::Criterion) {
    c.bench_function("deal a 12-player game", |b| {
        let mut seed = 0u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            started(seed)
        })
    });
}

fn playing_full_game(c: &mut criterion::Criterion) {
    c.bench_function("play a 12-player game to the end", |b| {
        b.iter(|| full_game(42))
    });
}

fn verifying_full_game(c: &mut criterion::Criterion) {
    let transcript = full_game(42);
    c.bench_function("verify a 12-player game by replay", |b| {
        b.iter(|| verify_transcript(&transcript))
    });
}
