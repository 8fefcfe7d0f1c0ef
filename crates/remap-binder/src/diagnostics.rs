//! Configuration errors surfaced by binding resolution.
//!
//! An unresolved parameter is not an error; it is a representable state the
//! owning configuration reacts to (try another constructor, validate, or
//! fall back to defaults). `BindError` covers only configuration mistakes
//! and the outcome of that validation step.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// `add_parameter` was called before any constructor was selected.
    NoConstructorSelected,
    /// Two parameters of the same constructor share a name under the
    /// engine's case-insensitive comparison rule. Name-correlated merges
    /// would silently pick one of them, so this is rejected up front.
    DuplicateParameterName { name: String },
    /// Validation found required parameters that no binding can supply.
    UnresolvedConstructor {
        dest_type: String,
        params: Vec<String>,
    },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::NoConstructorSelected => {
                write!(f, "no constructor selected; call reset before add_parameter")
            }
            BindError::DuplicateParameterName { name } => {
                write!(
                    f,
                    "constructor declares more than one parameter named `{name}` \
                     (case-insensitive)"
                )
            }
            BindError::UnresolvedConstructor { dest_type, params } => {
                write!(
                    f,
                    "no usable constructor for `{dest_type}`; unresolved parameters: {}",
                    params.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for BindError {}
