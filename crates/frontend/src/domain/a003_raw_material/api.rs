use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_materials() -> Result<Vec<RawMaterial>, String> {
    get_json("/api/materia-prima").await
}

pub async fn create_material(dto: &RawMaterialDto) -> Result<RawMaterial, String> {
    post_json("/api/materia-prima", dto).await
}
