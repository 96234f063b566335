use crate::Result;
use crate::render::ReportView;

pub fn render_json_report(view: &ReportView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
