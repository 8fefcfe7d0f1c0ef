//! Arena id newtypes.

use serde::{Deserialize, Serialize};

/// Index of a type description in a [`crate::TypeTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Index of a member description in a [`crate::TypeTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub u32);

/// Index of a constructor description in a [`crate::TypeTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CtorId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MemberId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl CtorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
