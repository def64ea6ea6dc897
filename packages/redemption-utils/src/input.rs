use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPONENT_ADDRESS: &str =
    "component_rdx1cpqcstnjnj5cpag7wc04y6t4azrfxjtr3g53jdpv4y72m0lpp8qkf4";
pub const DEFAULT_STATE_VERSION: &str = "282256254";

/// Raw text the operator has entered so far.
///
/// Nothing here is validated or coerced on write; every field stays exactly as
/// typed until a request is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
pub struct InputState {
    #[getset(get = "pub", set = "pub")]
    component_address: String,
    #[getset(get = "pub", set = "pub")]
    state_version: String,
    #[getset(get = "pub", set = "pub")]
    single_nft_id: String,
    #[getset(get = "pub")]
    batch_nft_ids: Vec<String>,
    /// text waiting to be appended to the batch list
    #[getset(get = "pub", set = "pub")]
    staged_nft_id: String,
    #[getset(get = "pub", set = "pub")]
    lower_price_bound: String,
    #[getset(get = "pub", set = "pub")]
    upper_price_bound: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            component_address: DEFAULT_COMPONENT_ADDRESS.to_string(),
            state_version: DEFAULT_STATE_VERSION.to_string(),
            single_nft_id: String::new(),
            // the batch list always opens with one empty row to type into
            batch_nft_ids: vec![String::new()],
            staged_nft_id: String::new(),
            lower_price_bound: String::new(),
            upper_price_bound: String::new(),
        }
    }
}

impl InputState {
    pub fn new(component_address: impl Into<String>, state_version: impl Into<String>) -> Self {
        Self {
            component_address: component_address.into(),
            state_version: state_version.into(),
            ..Default::default()
        }
    }

    /// Appends the trimmed id. Blank input is ignored and `false` is returned.
    pub fn push_batch_nft_id(&mut self, nft_id: &str) -> bool {
        let trimmed = nft_id.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.batch_nft_ids.push(trimmed.to_string());
        true
    }

    /// Appends the staged id and clears the staging text if anything was added.
    pub fn commit_staged_nft_id(&mut self) -> bool {
        let staged = std::mem::take(&mut self.staged_nft_id);
        if self.push_batch_nft_id(&staged) {
            true
        } else {
            self.staged_nft_id = staged;
            false
        }
    }

    pub fn remove_batch_nft_id(&mut self, index: usize) -> Option<String> {
        if index < self.batch_nft_ids.len() {
            Some(self.batch_nft_ids.remove(index))
        } else {
            None
        }
    }

    /// Overwrites the entry at `index` as typed. Out of range is a no-op.
    pub fn edit_batch_nft_id(&mut self, index: usize, nft_id: impl Into<String>) -> bool {
        match self.batch_nft_ids.get_mut(index) {
            Some(entry) => {
                *entry = nft_id.into();
                true
            }
            None => false,
        }
    }

    pub fn set_batch_nft_ids(&mut self, nft_ids: Vec<String>) -> &mut Self {
        self.batch_nft_ids = nft_ids;
        self
    }
}
