/// A participant's view of its write access to one block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OwnershipStatus {
    /// Nobody owns the block
    Available,
    /// This participant asked for the block and is waiting for the arbiter
    Requested,
    /// This participant owns the block and holds its token
    Granted,
    /// Another participant owns the block
    Denied,
}

impl OwnershipStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, OwnershipStatus::Available)
    }

    pub fn is_requested(&self) -> bool {
        matches!(self, OwnershipStatus::Requested)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, OwnershipStatus::Granted)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, OwnershipStatus::Denied)
    }

    /// Whether a new ownership request makes sense in this state
    pub fn can_request(&self) -> bool {
        !matches!(self, OwnershipStatus::Granted | OwnershipStatus::Requested)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OwnershipStatus::Available => "Available",
            OwnershipStatus::Requested => "Requested",
            OwnershipStatus::Granted => "Granted",
            OwnershipStatus::Denied => "Denied",
        }
    }
}
