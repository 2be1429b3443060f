use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub max_points: Option<usize>,
}
