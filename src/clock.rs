use chrono::{DateTime, Utc};

/// Hands out the server-assigned instants that order stored messages and
/// broadcast events.
///
/// Timestamps are non-decreasing even if the wall clock steps backwards.
/// Submissions sharing a timestamp are disambiguated by an increasing
/// sequence number, preserving insertion order.
#[derive(Debug, Default)]
pub struct SubmissionClock {
	state: parking_lot::Mutex<ClockState>,
}

#[derive(Debug, Default)]
struct ClockState {
	last_timestamp: Option<DateTime<Utc>>,
	sequence: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionInstant {
	pub timestamp: DateTime<Utc>,
	pub sequence: i64,
}

impl SubmissionClock {
	pub fn next(&self) -> SubmissionInstant {
		self.next_from(Utc::now())
	}

	fn next_from(&self, now: DateTime<Utc>) -> SubmissionInstant {
		let mut state = self.state.lock();
		match state.last_timestamp {
			Some(last) if now <= last => {
				state.sequence += 1;
				SubmissionInstant {
					timestamp: last,
					sequence: state.sequence,
				}
			}
			_ => {
				state.last_timestamp = Some(now);
				state.sequence = 0;
				SubmissionInstant {
					timestamp: now,
					sequence: 0,
				}
			}
		}
	}
}
