use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Deleting is irreversible, so the caller has to say it is sure.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}
