use crate::room::member_id::MemberId;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;

#[derive(Default)]
pub struct MemberIdSequence {
	next_id: AtomicU64,
}

impl MemberIdSequence {
	pub fn next(&self) -> MemberId {
		// Relaxed is enough, only the uniqueness of the counter value matters.
		MemberId::from(self.next_id.fetch_add(1, Relaxed))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn member_id_sequence_should_count() {
		let sequence = MemberIdSequence::default();
		assert_eq!(MemberId::from(0), sequence.next());
		assert_eq!(MemberId::from(1), sequence.next());
		assert_eq!(MemberId::from(2), sequence.next());
		assert_eq!(MemberId::from(3), sequence.next());
		assert_eq!(MemberId::from(4), sequence.next());
	}
}
