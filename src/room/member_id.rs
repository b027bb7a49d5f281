use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, derive_more::From, derive_more::Into)]
pub struct MemberId {
	id: u64,
}

impl Display for MemberId {
	fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
		write!(formatter, "MemberId({})", self.id)
	}
}
