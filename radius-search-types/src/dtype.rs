use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime tag for the precision of a coordinate buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dtype {
    Float32,
    Float64,
}

impl Dtype {
    /// Size in bytes of a single scalar of this precision.
    pub const fn byte_size(self) -> usize {
        match self {
            Dtype::Float32 => 4,
            Dtype::Float64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Dtype::Float32 => "Float32",
            Dtype::Float64 => "Float64",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
