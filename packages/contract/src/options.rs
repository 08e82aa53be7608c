/// Switches that affect which methods end up in a contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Only emit methods marked with the inclusion decorator.
    /// Underscore-prefixed names are dropped regardless of this flag.
    pub only_included_methods: bool,
}

impl CodegenOptions {
    /// Options restricting output to explicitly marked methods
    pub fn only_included() -> Self {
        Self {
            only_included_methods: true,
        }
    }
}
