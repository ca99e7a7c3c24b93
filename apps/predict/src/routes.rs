//! Two-route surface: the form page and the predict endpoint.
//!
//! Failures surface as an inline `Error: ...` string in the rendered page,
//! not as a structured error response — the form is the whole interface.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::model::{PricingModel, FEATURE_COUNT};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predictdatapoint", get(home).post(predict_datapoint))
        .with_state(state)
}

/// Raw form fields. Everything arrives as text; numeric validation happens in
/// `parse_features` so a bad value becomes an inline message, not a 422.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    pub area: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub stories: Option<String>,
    pub mainroad: Option<String>,
    pub basement: Option<String>,
    pub parking: Option<String>,
}

impl PredictForm {
    fn fields(&self) -> [(&'static str, Option<&String>); FEATURE_COUNT] {
        [
            ("area", self.area.as_ref()),
            ("bedrooms", self.bedrooms.as_ref()),
            ("bathrooms", self.bathrooms.as_ref()),
            ("stories", self.stories.as_ref()),
            ("mainroad", self.mainroad.as_ref()),
            ("basement", self.basement.as_ref()),
            ("parking", self.parking.as_ref()),
        ]
    }
}

/// Assembles the ordered feature vector, or an inline error message.
pub fn parse_features(form: &PredictForm) -> Result<[f64; FEATURE_COUNT], String> {
    let mut features = [0.0; FEATURE_COUNT];
    for (i, (name, value)) in form.fields().into_iter().enumerate() {
        let raw = value.ok_or_else(|| format!("Error: missing value for '{name}'"))?;
        features[i] = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Error: '{raw}' is not a number for '{name}'"))?;
    }
    Ok(features)
}

pub fn run_prediction(model: &PricingModel, form: &PredictForm) -> Result<f64, String> {
    parse_features(form).map(|features| model.predict(&features))
}

async fn home() -> Html<String> {
    Html(render_page(None))
}

async fn predict_datapoint(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let message = match run_prediction(&state.model, &form) {
        Ok(price) => format!("Predicted price: {price:.2}"),
        Err(e) => e,
    };
    Html(render_page(Some(&message)))
}

/// Renders the single form page, optionally with a result or error line.
fn render_page(message: Option<&str>) -> String {
    let mut inputs = String::new();
    for name in crate::model::FEATURE_NAMES {
        inputs.push_str(&format!(
            "<label>{name} <input type=\"text\" name=\"{name}\"></label><br>\n"
        ));
    }

    let result_block = match message {
        Some(msg) => format!("<p class=\"result\">{}</p>", escape_html(msg)),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Housing Price Prediction</title>\n</head>\n<body>\n\
         <h1>Housing Price Prediction</h1>\n\
         <form method=\"post\" action=\"/predictdatapoint\">\n{inputs}\
         <button type=\"submit\">Predict</button>\n</form>\n{result_block}\n</body>\n</html>\n"
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(values: [&str; FEATURE_COUNT]) -> PredictForm {
        PredictForm {
            area: Some(values[0].to_string()),
            bedrooms: Some(values[1].to_string()),
            bathrooms: Some(values[2].to_string()),
            stories: Some(values[3].to_string()),
            mainroad: Some(values[4].to_string()),
            basement: Some(values[5].to_string()),
            parking: Some(values[6].to_string()),
        }
    }

    #[test]
    fn test_parse_features_ordered() {
        let parsed = parse_features(&form(["7420", "4", "2", "3", "1", "0", "2"])).unwrap();
        assert_eq!(parsed, [7420.0, 4.0, 2.0, 3.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_non_numeric_field_is_inline_error() {
        let err = parse_features(&form(["7420", "four", "2", "3", "1", "0", "2"])).unwrap_err();
        assert!(err.starts_with("Error:"));
        assert!(err.contains("bedrooms"));
    }

    #[test]
    fn test_missing_field_is_inline_error() {
        let mut f = form(["7420", "4", "2", "3", "1", "0", "2"]);
        f.parking = None;
        let err = parse_features(&f).unwrap_err();
        assert!(err.contains("parking"));
    }

    #[test]
    fn test_page_carries_message() {
        let page = render_page(Some("Predicted price: 123.45"));
        assert!(page.contains("Predicted price: 123.45"));
        assert!(render_page(None).contains("<form"));
    }

    #[test]
    fn test_message_is_escaped() {
        let page = render_page(Some("Error: '<b>' is not a number"));
        assert!(!page.contains("'<b>'"));
        assert!(page.contains("&lt;b&gt;"));
    }
}
