use crate::config::NanoficheConfig;
use nanofiche::io::ext_repr::{ExtPackRequest, ExtPackingResult};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PackOutput {
    #[serde(flatten)]
    pub request: ExtPackRequest,
    pub result: ExtPackingResult,
    pub config: NanoficheConfig,
}
