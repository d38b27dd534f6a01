//! Plain-text rendering of assessments for the terminal.
//!
//! Everything here is a pure `String` builder so output can be tested
//! without capturing stdout.

use diabrisk_contracts::{
    model::ModelKind,
    patient::{Attribute, PatientRecord, ScaledRecord},
    prediction::{Assessment, RiskTier},
};

/// Characters between 0.0 and 1.0 on the gauge.
const GAUGE_WIDTH: usize = 50;

/// Gauge tick labels, every 0.2.
const GAUGE_TICKS: usize = 6;

const RULE: &str = "----------------------------------------";

/// Full report for one assessment.
pub fn assessment(a: &Assessment) -> String {
    let mut out = String::new();

    push_line(&mut out, &format!("Prediction ({})", a.model));
    push_line(&mut out, RULE);
    push_line(
        &mut out,
        &format!("Estimated probability of diabetes: {:.2}", a.result.probability),
    );
    push_line(&mut out, a.tier.message());
    out.push('\n');

    out.push_str(&comparison(&a.record));
    out.push('\n');
    out.push_str(&gauge(a.result.probability, a.tier));
    out.push('\n');

    push_line(&mut out, "Interpretation");
    push_line(&mut out, RULE);
    push_line(&mut out, interpretation(a.result.label));

    out
}

/// The patient's numeric values next to the dataset averages.
pub fn comparison(record: &PatientRecord) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("{:<24} {:>10} {:>10} {:>10}", "Attribute", "Patient", "Average", "Diff"),
    );

    for attribute in Attribute::NUMERIC {
        let Some(average) = attribute.population_average() else {
            continue;
        };
        let value = record.value(attribute);
        push_line(
            &mut out,
            &format!(
                "{:<24} {:>10.2} {:>10.2} {:>+10.2}",
                attribute.label(),
                value,
                average,
                value - average
            ),
        );
    }

    push_line(
        &mut out,
        &format!(
            "{:<24} {:>10}",
            Attribute::FamilyHistoryOfDiabetes.label(),
            if record.family_history_of_diabetes { "yes" } else { "no" }
        ),
    );

    out
}

/// A horizontal bar from 0 to 1 filled up to `probability`.
pub fn gauge(probability: f64, tier: RiskTier) -> String {
    let filled = (probability.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;

    let mut out = String::new();
    push_line(&mut out, &format!("Risk level ({}, {})", tier, tier.color()));
    push_line(
        &mut out,
        &format!(
            "|{}{}| {:.2}",
            "#".repeat(filled),
            ".".repeat(GAUGE_WIDTH - filled),
            probability
        ),
    );

    let step = GAUGE_WIDTH / (GAUGE_TICKS - 1);
    let mut axis = String::from(" ");
    for tick in 0..GAUGE_TICKS {
        let label = format!("{:.1}", tick as f64 / (GAUGE_TICKS - 1) as f64);
        if tick + 1 < GAUGE_TICKS {
            axis.push_str(&format!("{:<width$}", label, width = step));
        } else {
            axis.push_str(&label);
        }
    }
    push_line(&mut out, &axis);

    out
}

/// Closing advice keyed on the predicted label.
pub fn interpretation(label: u8) -> &'static str {
    if label == 1 {
        "The model indicates an elevated risk of diabetes. A detailed medical evaluation is \
         recommended, along with glucose monitoring and improved diet and exercise habits."
    } else {
        "The model suggests a low risk of diabetes. Regular medical check-ups and a healthy \
         lifestyle are still recommended."
    }
}

/// One line per model for side-by-side comparison.
pub fn model_comparison(assessments: &[Assessment]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("{:<20} {:>11} {:>6} {:>9}", "Model", "Probability", "Label", "Risk"),
    );
    for a in assessments {
        push_line(
            &mut out,
            &format!(
                "{:<20} {:>11.2} {:>6} {:>9}",
                a.model.name(),
                a.result.probability,
                a.result.label,
                a.tier.to_string()
            ),
        );
    }
    out
}

/// Raw and scaled value of every attribute.
pub fn scaled(record: &PatientRecord, scaled: &ScaledRecord) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("{:<28} {:>10} {:>10}", "Feature", "Raw", "Scaled"));
    for attribute in Attribute::ALL {
        push_line(
            &mut out,
            &format!(
                "{:<28} {:>10.2} {:>10.4}",
                attribute.name(),
                record.value(attribute),
                scaled.get(attribute)
            ),
        );
    }
    out
}

/// Selection names and descriptions of every model.
pub fn model_list() -> String {
    ModelKind::ALL
        .iter()
        .map(|kind| format!("{:<20} {}\n", kind.name(), kind.description()))
        .collect()
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
