//! Plain-text summaries of a submitted record for e-mail notifications.

use super::catalog;
use super::record::IntakeRecord;
use super::step::StepSchema;

/// Subject line of the operator notification.
pub fn operator_subject(record: &IntakeRecord) -> String {
    format!(
        "Novo briefing ({}) - {}",
        record.kind().display_name(),
        record.company_name().as_deref().unwrap_or("empresa não informada")
    )
}

/// Section-by-section listing of the answers, one `Label: value` per line.
///
/// Sections follow the steps of the record's questionnaire; blank answers
/// and steps without answers are omitted.
pub fn operator_summary(record: &IntakeRecord) -> String {
    summarize_with(record, &catalog::schema_for(record.kind()))
}

fn summarize_with(record: &IntakeRecord, schema: &StepSchema) -> String {
    let mut out = format!(
        "{}\nNovo briefing recebido em {}\nProtocolo: {}\n",
        record.kind().display_name(),
        record.submitted_at().to_display_string(),
        record.id()
    );

    for step in schema.steps() {
        let lines: Vec<String> = step
            .fields
            .iter()
            .filter_map(|f| record.text(&f.name).map(|v| format!("{}: {}", f.label, v)))
            .collect();
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("\n== {} ==\n", step.title));
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Subject line of the submitter confirmation.
pub fn confirmation_subject(record: &IntakeRecord) -> String {
    format!("Recebemos seu briefing - {}", record.kind().display_name())
}

/// Short confirmation sent to the submitter.
pub fn confirmation_message(record: &IntakeRecord) -> String {
    let name = record.submitter_name().unwrap_or_else(|| "cliente".to_string());
    let company = record
        .company_name()
        .unwrap_or_else(|| "sua empresa".to_string());
    format!(
        "Olá {}, recebemos os dados da empresa {} com sucesso. Em breve entraremos em contato com seu relatório.",
        name, company
    )
}
