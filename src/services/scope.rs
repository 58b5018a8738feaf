/// Which relation a conversation list is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Threads owned by the given tenant, joined to their conversations for search.
    Owner(String),
    /// Every conversation row, regardless of owner.
    Global,
}

impl Scope {
    /// Owner scope when a non-blank identity is supplied, global otherwise.
    pub fn resolve(owner: Option<&str>) -> Self {
        match owner.map(str::trim) {
            Some(owner) if !owner.is_empty() => Self::Owner(owner.to_string()),
            _ => Self::Global,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Owner(owner) => Some(owner),
            Self::Global => None,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}
