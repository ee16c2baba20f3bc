// Per-topic aggregation over the event log
//
// Single pass: one accumulator per image plus topic-wide distinct counts.
// An image enters the output only once it has a positive click; rank-only or
// load-only images are deliberately absent. Encounter order is the order of
// first qualifying click in the input iteration, and the final sort by click
// count is stable so ties keep that order.

use std::collections::{HashMap, HashSet};

use eyecatcher_contracts::{EventKind, GameResult, ImageStats, TopicAnalytics};

#[derive(Debug, Default)]
struct ImageAccumulator {
    clicks: i64,
    rank_sum: i64,
    rank_count: i64,
    position_sum: i64,
    position_count: i64,
}

impl ImageAccumulator {
    fn into_stats(self, image_url: String) -> ImageStats {
        ImageStats {
            image_url,
            clicks: self.clicks,
            average_rank: (self.rank_count > 0)
                .then(|| self.rank_sum as f64 / self.rank_count as f64),
            rank_count: self.rank_count,
            average_position: (self.position_count > 0)
                .then(|| self.position_sum as f64 / self.position_count as f64),
            position_count: self.position_count,
        }
    }
}

/// Aggregate a topic's events into dashboard statistics.
///
/// `events` is expected in the order the caller wants encounter-order ties
/// resolved; the server passes rows in reverse-chronological creation order.
/// A topic with no events yields zero counts and an empty image list.
pub fn aggregate_topic(topic_name: impl Into<String>, events: &[GameResult]) -> TopicAnalytics {
    let mut by_image: HashMap<&str, ImageAccumulator> = HashMap::new();
    let mut click_order: Vec<&str> = Vec::new();
    let mut participant_ids: HashSet<&str> = HashSet::new();
    let mut participant_names: HashSet<&str> = HashSet::new();

    for event in events {
        participant_ids.insert(&event.participant_id);
        participant_names.insert(&event.participant_name);

        match event.event_kind {
            // A toggled-off click (value 0) stays in the log but touches no
            // per-image counter; positive clicks only ever increment.
            EventKind::Click if event.value == 1 => {
                let acc = by_image.entry(&event.image_url).or_default();
                acc.clicks += 1;
                if acc.clicks == 1 {
                    click_order.push(&event.image_url);
                }
                if let Some(position) = event.position {
                    acc.position_sum += i64::from(position);
                    acc.position_count += 1;
                }
            }
            EventKind::Click => {}
            EventKind::Rank => {
                let acc = by_image.entry(&event.image_url).or_default();
                acc.rank_sum += i64::from(event.value);
                acc.rank_count += 1;
            }
            EventKind::Load => {}
        }
    }

    let mut image_stats: Vec<ImageStats> = click_order
        .into_iter()
        .filter_map(|url| {
            by_image
                .remove(url)
                .map(|acc| acc.into_stats(url.to_string()))
        })
        .collect();

    // Stable: ties keep first-click encounter order
    image_stats.sort_by(|a, b| b.clicks.cmp(&a.clicks));

    TopicAnalytics {
        topic_name: topic_name.into(),
        total_responses: participant_ids.len() as i64,
        unique_names: participant_names.len() as i64,
        total_events: events.len() as i64,
        image_stats,
    }
}
