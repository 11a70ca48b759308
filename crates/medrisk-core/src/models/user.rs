use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Verified identity forwarded by the upstream authorizer.
///
/// Used to label reports only; never an input to risk computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserContext {
    pub id: String,
    pub name: String,
    pub email: String,
}
