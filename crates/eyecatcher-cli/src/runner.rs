// Simulated participant session
//
// Drives GameFlow against a live API. LOAD and CLICK submissions are
// fire-and-forget (failures logged and dropped, never retried); RANK
// submissions are awaited one at a time in increasing rank order before the
// flow advances, the only ordering-sensitive emission in the system.

use std::time::Duration;

use anyhow::{Context, Result};
use eyecatcher_contracts::{GameResult, SubmitResultRequest, TopicsResponse};
use eyecatcher_core::{EventDraft, GameFlow, Phase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::client::Client;

/// Client-side identity: id generated once per run, name fixed at welcome
#[derive(Debug, Clone)]
pub struct Identity {
    pub participant_id: String,
    pub participant_name: String,
}

pub struct RunnerOptions {
    /// Skip the real one-second waits between ticks
    pub fast: bool,
    /// Chance of toggling some image on each click-test tick
    pub click_probability: f64,
    /// Seed for the shuffle and simulated choices
    pub seed: Option<u64>,
}

pub async fn play_session(client: Client, name: &str, options: RunnerOptions) -> Result<()> {
    let topics = client
        .get::<TopicsResponse>("/topics")
        .await
        .context("failed to fetch topics")?
        .topics;
    tracing::info!(count = topics.len(), "Fetched topic catalog");

    let mut flow = GameFlow::new(topics)?;
    flow.submit_name(name)?;

    let identity = Identity {
        participant_id: format!("user_{}", Uuid::now_v7()),
        participant_name: flow
            .participant_name()
            .unwrap_or_default()
            .to_string(),
    };
    tracing::info!(participant_id = %identity.participant_id, "Session starting");

    flow.acknowledge_instructions()?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    while !flow.is_finished() {
        if !options.fast {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        match flow.phase() {
            Phase::TopicCountdown { .. } => {
                for draft in flow.tick(&mut rng) {
                    submit_detached(&client, &identity, draft);
                }
            }
            Phase::ClickTest { display, .. } => {
                // Occasionally toggle an image, mimicking a participant
                if !display.is_empty() && rng.gen_bool(options.click_probability) {
                    let image = display[rng.gen_range(0..display.len())].clone();
                    let draft = flow.toggle_image(&image)?;
                    submit_detached(&client, &identity, draft);
                }
                for draft in flow.tick(&mut rng) {
                    submit_detached(&client, &identity, draft);
                }
            }
            Phase::RankTest { ranked } => {
                if ranked.len() > 1 {
                    let from = rng.gen_range(0..ranked.len());
                    let to = rng.gen_range(0..ranked.len());
                    flow.move_ranked(from, to)?;
                }
                for draft in flow.finish_ranking()? {
                    // Sequential: rank order must reach the server in order
                    if let Err(e) = client
                        .post::<GameResult, _>("/results", &to_request(&identity, &draft))
                        .await
                    {
                        tracing::warn!("dropping failed RANK submission: {e}");
                    }
                }
                tracing::info!("Topic complete");
            }
            Phase::Welcome | Phase::Instructions | Phase::Thanks => {}
        }
    }

    tracing::info!("Session complete");
    Ok(())
}

/// Fire-and-forget submission; the flow never blocks on LOAD/CLICK logging
fn submit_detached(client: &Client, identity: &Identity, draft: EventDraft) {
    let client = client.clone();
    let request = to_request(identity, &draft);
    tokio::spawn(async move {
        if let Err(e) = client.post::<GameResult, _>("/results", &request).await {
            tracing::warn!("dropping failed event submission: {e}");
        }
    });
}

fn to_request(identity: &Identity, draft: &EventDraft) -> SubmitResultRequest {
    SubmitResultRequest {
        participant_id: Some(identity.participant_id.clone()),
        participant_name: Some(identity.participant_name.clone()),
        event_kind: Some(draft.kind.to_string()),
        topic_name: Some(draft.topic_name.clone()),
        image_url: Some(draft.image_url.clone()),
        value: Some(draft.value),
        position: draft.position,
    }
}
