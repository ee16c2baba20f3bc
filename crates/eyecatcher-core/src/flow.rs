// Participant flow state machine
//
// One variant per phase, carrying exactly the data that phase needs. The
// machine never performs I/O: interactions and timer ticks return EventDraft
// records that the caller submits to the recording endpoint. Only the RANK
// drafts are ordering-sensitive downstream; callers must submit them in the
// order returned.

use eyecatcher_contracts::{EventKind, Topic};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Seconds shown before each topic's click test
pub const TOPIC_COUNTDOWN_SECS: u32 = 3;

/// Duration of the click test for one topic
pub const CLICK_TEST_SECS: u32 = 10;

/// Minimum display-name length after trimming
pub const MIN_NAME_CHARS: usize = 2;

/// A not-yet-submitted result event produced by a flow transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventKind,
    pub topic_name: String,
    pub image_url: String,
    pub value: i32,
    pub position: Option<i32>,
}

/// Errors from invalid flow input
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("display name must be at least {MIN_NAME_CHARS} characters")]
    NameTooShort,

    #[error("cannot start a session without topics")]
    NoTopics,

    #[error("operation not valid in the {0} phase")]
    WrongPhase(&'static str),

    #[error("image is not on display: {0}")]
    UnknownImage(String),

    #[error("rank move out of bounds: {from} -> {to} (len {len})")]
    MoveOutOfBounds { from: usize, to: usize, len: usize },
}

/// Current phase of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Collecting the display name
    Welcome,
    /// Static instructions, explicit continue
    Instructions,
    /// Fixed countdown before the current topic's click test
    TopicCountdown { remaining: u32 },
    /// Timed click test over a shuffled image grid
    ClickTest {
        remaining: u32,
        /// Shuffled display order for this topic
        display: Vec<String>,
        /// Clicked set in order of first click
        clicked: Vec<String>,
    },
    /// Drag-to-rank over the clicked images
    RankTest { ranked: Vec<String> },
    /// Terminal
    Thanks,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Welcome => "welcome",
            Phase::Instructions => "instructions",
            Phase::TopicCountdown { .. } => "topicCountdown",
            Phase::ClickTest { .. } => "clickTest",
            Phase::RankTest { .. } => "rankTest",
            Phase::Thanks => "thanks",
        }
    }
}

/// Drives a participant through every topic in order
#[derive(Debug, Clone)]
pub struct GameFlow {
    topics: Vec<Topic>,
    topic_index: usize,
    participant_name: Option<String>,
    phase: Phase,
}

impl GameFlow {
    pub fn new(topics: Vec<Topic>) -> Result<Self, FlowError> {
        if topics.is_empty() {
            return Err(FlowError::NoTopics);
        }
        Ok(Self {
            topics,
            topic_index: 0,
            participant_name: None,
            phase: Phase::Welcome,
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn current_topic(&self) -> &Topic {
        &self.topics[self.topic_index]
    }

    /// Name fixed at welcome; None until then
    pub fn participant_name(&self) -> Option<&str> {
        self.participant_name.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Thanks
    }

    /// Welcome -> Instructions, fixing the display name for the session
    pub fn submit_name(&mut self, name: &str) -> Result<(), FlowError> {
        if self.phase != Phase::Welcome {
            return Err(FlowError::WrongPhase(self.phase.name()));
        }
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_NAME_CHARS {
            return Err(FlowError::NameTooShort);
        }
        self.participant_name = Some(trimmed.to_string());
        self.phase = Phase::Instructions;
        Ok(())
    }

    /// Instructions -> TopicCountdown
    pub fn acknowledge_instructions(&mut self) -> Result<(), FlowError> {
        if self.phase != Phase::Instructions {
            return Err(FlowError::WrongPhase(self.phase.name()));
        }
        self.phase = Phase::TopicCountdown {
            remaining: TOPIC_COUNTDOWN_SECS,
        };
        Ok(())
    }

    /// Advance timers by one second.
    ///
    /// Entering the click test shuffles the topic's images and returns one
    /// LOAD draft per image tagged with its display position. Ticks in
    /// untimed phases are no-ops.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<EventDraft> {
        match &mut self.phase {
            Phase::TopicCountdown { remaining } => {
                *remaining -= 1;
                if *remaining == 0 {
                    return self.begin_click_test(rng);
                }
                Vec::new()
            }
            Phase::ClickTest {
                remaining, clicked, ..
            } => {
                *remaining -= 1;
                if *remaining == 0 {
                    let ranked = std::mem::take(clicked);
                    self.phase = Phase::RankTest { ranked };
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn begin_click_test<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<EventDraft> {
        let topic = &self.topics[self.topic_index];
        let mut display = topic.images.clone();
        display.shuffle(rng);

        let drafts = display
            .iter()
            .enumerate()
            .map(|(index, image_url)| EventDraft {
                kind: EventKind::Load,
                topic_name: topic.name.clone(),
                image_url: image_url.clone(),
                value: index as i32,
                position: None,
            })
            .collect();

        self.phase = Phase::ClickTest {
            remaining: CLICK_TEST_SECS,
            display,
            clicked: Vec::new(),
        };
        drafts
    }

    /// Toggle an image in or out of the clicked set during the click test.
    ///
    /// Returns the CLICK draft: value 1 when added, 0 when removed, with the
    /// image's current display position either way.
    pub fn toggle_image(&mut self, image_url: &str) -> Result<EventDraft, FlowError> {
        let topic_name = self.topics[self.topic_index].name.clone();
        let Phase::ClickTest {
            display, clicked, ..
        } = &mut self.phase
        else {
            return Err(FlowError::WrongPhase(self.phase.name()));
        };

        let position = display
            .iter()
            .position(|url| url == image_url)
            .ok_or_else(|| FlowError::UnknownImage(image_url.to_string()))?;

        let value = if let Some(at) = clicked.iter().position(|url| url == image_url) {
            clicked.remove(at);
            0
        } else {
            clicked.push(image_url.to_string());
            1
        };

        Ok(EventDraft {
            kind: EventKind::Click,
            topic_name,
            image_url: image_url.to_string(),
            value,
            position: Some(position as i32),
        })
    }

    /// Reorder the ranked list: remove at `from`, reinsert at `to`.
    /// Purely local state; no draft is produced per intermediate move.
    pub fn move_ranked(&mut self, from: usize, to: usize) -> Result<(), FlowError> {
        let Phase::RankTest { ranked } = &mut self.phase else {
            return Err(FlowError::WrongPhase(self.phase.name()));
        };
        if from >= ranked.len() || to >= ranked.len() {
            return Err(FlowError::MoveOutOfBounds {
                from,
                to,
                len: ranked.len(),
            });
        }
        let url = ranked.remove(from);
        ranked.insert(to, url);
        Ok(())
    }

    /// Commit the ranking and advance to the next topic or Thanks.
    ///
    /// Returns one RANK draft per image, value = 1-based final position, in
    /// increasing order. An empty clicked set yields no drafts and acts as
    /// the plain continue action.
    pub fn finish_ranking(&mut self) -> Result<Vec<EventDraft>, FlowError> {
        let topic_name = self.topics[self.topic_index].name.clone();
        let Phase::RankTest { ranked } = &mut self.phase else {
            return Err(FlowError::WrongPhase(self.phase.name()));
        };

        let drafts = ranked
            .iter()
            .enumerate()
            .map(|(index, image_url)| EventDraft {
                kind: EventKind::Rank,
                topic_name: topic_name.clone(),
                image_url: image_url.clone(),
                value: index as i32 + 1,
                position: None,
            })
            .collect();

        if self.topic_index + 1 < self.topics.len() {
            self.topic_index += 1;
            self.phase = Phase::TopicCountdown {
                remaining: TOPIC_COUNTDOWN_SECS,
            };
        } else {
            self.phase = Phase::Thanks;
        }
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn topic(name: &str, images: &[&str]) -> Topic {
        Topic {
            name: name.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn flow_at_click_test(topics: Vec<Topic>) -> (GameFlow, Vec<EventDraft>) {
        let mut flow = GameFlow::new(topics).unwrap();
        flow.submit_name("Ada").unwrap();
        flow.acknowledge_instructions().unwrap();
        let mut rng = rng();
        let mut drafts = Vec::new();
        for _ in 0..TOPIC_COUNTDOWN_SECS {
            drafts = flow.tick(&mut rng);
        }
        (flow, drafts)
    }

    #[test]
    fn rejects_empty_topic_list() {
        assert!(matches!(GameFlow::new(vec![]), Err(FlowError::NoTopics)));
    }

    #[test]
    fn name_is_trimmed_and_validated() {
        let mut flow = GameFlow::new(vec![topic("Shoes", &["a"])]).unwrap();
        assert!(matches!(
            flow.submit_name("  x "),
            Err(FlowError::NameTooShort)
        ));
        assert_eq!(flow.phase(), &Phase::Welcome);

        flow.submit_name("  Ada  ").unwrap();
        assert_eq!(flow.participant_name(), Some("Ada"));
        assert_eq!(flow.phase(), &Phase::Instructions);
    }

    #[test]
    fn countdown_runs_three_ticks_then_loads() {
        let (flow, drafts) = flow_at_click_test(vec![topic("Shoes", &["a", "b", "c"])]);

        // One LOAD per image, values covering every display position
        assert_eq!(drafts.len(), 3);
        assert!(drafts.iter().all(|d| d.kind == EventKind::Load));
        let mut values: Vec<i32> = drafts.iter().map(|d| d.value).collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2]);

        match flow.phase() {
            Phase::ClickTest {
                remaining, display, ..
            } => {
                assert_eq!(*remaining, CLICK_TEST_SECS);
                let mut sorted = display.clone();
                sorted.sort();
                assert_eq!(sorted, vec!["a", "b", "c"]);
            }
            other => panic!("expected clickTest, got {other:?}"),
        }
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let (flow_a, _) = flow_at_click_test(vec![topic("Shoes", &["a", "b", "c", "d"])]);
        let (flow_b, _) = flow_at_click_test(vec![topic("Shoes", &["a", "b", "c", "d"])]);
        assert_eq!(flow_a.phase(), flow_b.phase());
    }

    #[test]
    fn toggle_emits_click_and_unclick_drafts() {
        let (mut flow, _) = flow_at_click_test(vec![topic("Shoes", &["a", "b"])]);

        let on = flow.toggle_image("a").unwrap();
        assert_eq!(on.kind, EventKind::Click);
        assert_eq!(on.value, 1);
        assert!(on.position.is_some());

        let off = flow.toggle_image("a").unwrap();
        assert_eq!(off.value, 0);
        assert_eq!(off.position, on.position);

        // Re-click produces a fresh value-1 draft
        let again = flow.toggle_image("a").unwrap();
        assert_eq!(again.value, 1);

        assert!(matches!(
            flow.toggle_image("missing"),
            Err(FlowError::UnknownImage(_))
        ));
    }

    #[test]
    fn click_test_expiry_carries_clicked_order_into_ranking() {
        let (mut flow, _) = flow_at_click_test(vec![topic("Shoes", &["a", "b", "c"])]);
        flow.toggle_image("b").unwrap();
        flow.toggle_image("a").unwrap();

        let mut rng = rng();
        for _ in 0..CLICK_TEST_SECS {
            assert!(flow.tick(&mut rng).is_empty());
        }
        assert_eq!(
            flow.phase(),
            &Phase::RankTest {
                ranked: vec!["b".to_string(), "a".to_string()]
            }
        );
    }

    #[test]
    fn ranking_emits_one_based_ranks_in_order() {
        let (mut flow, _) = flow_at_click_test(vec![topic("Shoes", &["a", "b", "c"])]);
        flow.toggle_image("a").unwrap();
        flow.toggle_image("b").unwrap();
        flow.toggle_image("c").unwrap();
        let mut rng = rng();
        for _ in 0..CLICK_TEST_SECS {
            flow.tick(&mut rng);
        }

        // a,b,c -> move c to the top
        flow.move_ranked(2, 0).unwrap();
        let drafts = flow.finish_ranking().unwrap();

        let ranked: Vec<(&str, i32)> = drafts
            .iter()
            .map(|d| (d.image_url.as_str(), d.value))
            .collect();
        assert_eq!(ranked, vec![("c", 1), ("a", 2), ("b", 3)]);
        assert!(drafts.iter().all(|d| d.kind == EventKind::Rank));
        assert!(flow.is_finished());
    }

    #[test]
    fn empty_clicked_set_skips_ranking_silently() {
        let (mut flow, _) = flow_at_click_test(vec![topic("Shoes", &["a"])]);
        let mut rng = rng();
        for _ in 0..CLICK_TEST_SECS {
            flow.tick(&mut rng);
        }
        let drafts = flow.finish_ranking().unwrap();
        assert!(drafts.is_empty());
        assert!(flow.is_finished());
    }

    #[test]
    fn advances_through_all_topics_before_thanks() {
        let topics = vec![topic("Shoes", &["a"]), topic("Bags", &["x", "y"])];
        let (mut flow, _) = flow_at_click_test(topics);
        let mut rng = rng();

        flow.toggle_image("a").unwrap();
        for _ in 0..CLICK_TEST_SECS {
            flow.tick(&mut rng);
        }
        let drafts = flow.finish_ranking().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].topic_name, "Shoes");

        // Clicked state is reset and the countdown restarts for Bags
        assert_eq!(
            flow.phase(),
            &Phase::TopicCountdown {
                remaining: TOPIC_COUNTDOWN_SECS
            }
        );
        assert_eq!(flow.current_topic().name, "Bags");

        let mut loads = Vec::new();
        for _ in 0..TOPIC_COUNTDOWN_SECS {
            loads = flow.tick(&mut rng);
        }
        assert_eq!(loads.len(), 2);
        assert!(loads.iter().all(|d| d.topic_name == "Bags"));

        for _ in 0..CLICK_TEST_SECS {
            flow.tick(&mut rng);
        }
        assert!(flow.finish_ranking().unwrap().is_empty());
        assert!(flow.is_finished());
    }

    #[test]
    fn operations_reject_wrong_phase() {
        let mut flow = GameFlow::new(vec![topic("Shoes", &["a"])]).unwrap();
        assert!(matches!(
            flow.acknowledge_instructions(),
            Err(FlowError::WrongPhase("welcome"))
        ));
        assert!(matches!(
            flow.toggle_image("a"),
            Err(FlowError::WrongPhase("welcome"))
        ));
        assert!(matches!(
            flow.finish_ranking(),
            Err(FlowError::WrongPhase("welcome"))
        ));

        flow.submit_name("Ada").unwrap();
        assert!(matches!(
            flow.submit_name("Ada"),
            Err(FlowError::WrongPhase("instructions"))
        ));
    }
}
