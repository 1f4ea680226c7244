//! Post-initialization check that every planned object exists

use tracing::{info, warn};

use crate::error::SchemaError;
use crate::ports::SchemaInspector;
use crate::schema::{MissingObject, SchemaPlan};

/// Compare the live schema with `plan` and return what is missing.
pub async fn verify_schema(
    inspector: &dyn SchemaInspector,
    plan: &SchemaPlan,
) -> Result<Vec<MissingObject>, SchemaError> {
    let snapshot = inspector.inspect().await.map_err(SchemaError::Inspection)?;
    let missing = snapshot.missing_from(plan);

    if missing.is_empty() {
        info!("Schema verified: all {} objects present", plan.len());
    } else {
        for object in &missing {
            warn!("Schema object missing after initialization: {}", object);
        }
    }

    Ok(missing)
}
