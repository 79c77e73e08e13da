//! Imposter Engine Demo
//!
//! Plays one elimination game and one timed game through the engine, then
//! verifies both by deterministic replay.
//!
//! Usage: `imposter-engine [SEED]`

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use imposter::{
    verify_transcript, CategorySet, EngineConfig, GameAction, GameMode, GameSession, GameTranscript,
    Phase, SetupPatch, VERSION,
};

fn main() -> Result<()> {
    let config = EngineConfig::from_env().context("loading configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_env("IMPOSTER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("building log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u32>())
        .transpose()
        .context("seed must be an unsigned 32-bit integer")?;

    info!("Imposter Engine v{}", VERSION);
    info!("Timed round: {} seconds", config.round_duration.as_secs());

    let categories = config.load_categories().context("loading categories")?;
    info!("Categories: {}", categories.names().join(", "));

    let elimination = demo_game(&config, &categories, GameMode::Elimination, seed)?;
    verify(&elimination)?;

    let timed = demo_game(&config, &categories, GameMode::Timed, seed)?;
    verify(&timed)?;

    Ok(())
}

/// Play one scripted game and return its transcript.
fn demo_game(
    config: &EngineConfig,
    categories: &CategorySet,
    mode: GameMode,
    seed: Option<u32>,
) -> Result<GameTranscript> {
    info!("=== Starting {:?} Game ===", mode);

    let mut session = GameSession::new(config.initial_state()).with_categories(categories.clone());

    let mut patch = SetupPatch::categories(categories.names()).with_mode(mode);
    patch.seed = seed;
    session.dispatch(GameAction::SetupUpdate(patch));

    let state = session.start();
    if let Some(result) = state.result {
        bail!("setup rejected: {:?}", result.reason);
    }
    info!(
        "Seed {} dealt '{}' from {} to {} players",
        state.seed,
        state.secret_word,
        state.category_name,
        state.reveal_order.len()
    );

    while let Some(player) = session.state().current_reveal_player() {
        if let Some(card) = session.state().card_for(player) {
            info!("{} sees {:?} ({})", player, card.role, card.word.unwrap_or("no word"));
        }
        session.dispatch(GameAction::RevealNext);
    }

    match session.state().phase {
        Phase::Timer => {
            info!("Round clock runs for {:?}", config.round_duration);
            session.dispatch(GameAction::TimerEnd);
        }
        _ => play_votes(&mut session),
    }

    let state = session.state();
    if let Some(result) = state.result {
        info!("Winner: {:?} ({:?})", result.winner, result.reason);
    }
    let imposters: Vec<String> = state.imposters().iter().map(ToString::to_string).collect();
    info!("Imposters were: {}", imposters.join(", "));

    Ok(session.into_transcript())
}

/// Vote until a side wins. Each voter picks among the offered targets by
/// rotating on seat and round number.
fn play_votes<S: imposter::SeedSource>(session: &mut GameSession<S>) {
    while session.state().phase == Phase::Discussion {
        let round = session.state().round.number as usize;
        session.dispatch(GameAction::DiscussionStartVoting);

        while let Some(voter) = session.state().current_voter() {
            let targets = session.state().eligible_targets();
            let Some(&target) = targets.get((voter.get() as usize + round) % targets.len().max(1)) else {
                break;
            };
            session.dispatch(GameAction::VoteCast { voter, target });
            session.dispatch(GameAction::VotingConfirmNext);
        }

        let state = session.state();
        if let Some(last) = &state.last_elimination {
            info!(
                "Round {}: {} eliminated{}",
                state.round.number,
                last.eliminated,
                if last.was_revote { " after a revote" } else { "" }
            );
        }
        if state.phase == Phase::Discussion {
            session.dispatch(GameAction::RoundContinue);
        }
    }
}

/// Replay a transcript and report its hashes.
fn verify(transcript: &GameTranscript) -> Result<()> {
    let bytes = transcript.to_bytes().context("encoding transcript")?;
    let replay = verify_transcript(transcript).context("verifying transcript")?;

    info!("Game ID: {}", transcript.game_id);
    info!("Transcript: {} actions, {} bytes", replay.steps, bytes.len());
    info!("Final State Hash: {}", hex::encode(replay.final_hash));
    info!("DETERMINISM VERIFIED: replay matches every recorded hash");
    Ok(())
}
