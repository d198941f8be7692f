//! Prompt templates for report synthesis.
//!
//! Templates reference answers with `{{fieldName}}` placeholders. The special
//! placeholder `{{record_json}}` expands to the pretty-printed answers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::intake::{IntakeKind, IntakeRecord};

/// Text substituted for answers that are missing or blank.
pub const MISSING_VALUE: &str = "não informado";

const RECORD_JSON: &str = "record_json";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
});

const BUSINESS_BRIEFING_INSTRUCTION: &str = "\
Você é um consultor de estratégia de negócios da MD Solution Marketing & Consultoria. \
Analise as respostas de um briefing e escreva um Relatório de Diagnóstico profissional, conciso e humano.
Regras:
- Nunca mencione inteligência artificial.
- Escreva em português do Brasil, de forma profissional e empática.
- Dê atenção especial ao produto ou serviço: preço, formas de pagamento e diferencial frente aos referenciais do segmento.
- Use títulos Markdown (##) para cada seção, listas com '-' e tabelas com '|'.
Estrutura obrigatória: 1. Resumo Executivo, 2. Momento Atual, 3. Presença Digital, \
4. Análise de Produto/Serviço (posicionamento de preço, facilidade de compra, diferencial), \
5. Atendimento e Vendas, 6. Posicionamento vs Concorrência, 7. Tabela de Benchmarks do Segmento, \
8. Pontos Fortes, 9. Oportunidades (ajuste de preço/parcelamento), \
10. Recomendação de Plano (Essencial/Profissional/Premium), 11. Consultoria de Vendas (se necessário), \
12. Próximos Passos.";

const BUSINESS_BRIEFING_BODY: &str = "\
Gere o relatório completo para a empresa \"{{companyName}}\".
DADOS DE ENTRADA:
{{record_json}}

Compare o preço ({{priceRange}}), o parcelamento ({{maxInstallments}}) e o prazo de entrega ({{deliveryTime}}) \
com os referenciais típicos do segmento \"{{segment}}\". Indique se o preço está acima ou abaixo do mercado \
e se há barreiras de conversão no pagamento.";

const SWOT_INSTRUCTION: &str = "\
Você é um consultor de negócios especialista em Análise SWOT e planejamento estratégico para pequenas e médias empresas. \
Transforme as respostas de um questionário SWOT em um relatório estratégico personalizado, claro e prático, \
sem jargões e sem mencionar que o conteúdo foi produzido por inteligência artificial.
Regras de estilo:
- Não use as palavras 'IA', 'algoritmo' ou 'modelo'. Prefira 'Com base nas suas respostas' ou 'Nesta análise'.
- Português do Brasil, simples e acolhedor, falando com o leitor na segunda pessoa.
- Use títulos Markdown (##) para cada seção, listas com '-' e tabelas com '|'.
Estrutura obrigatória: 1. Capa/Introdução, 2. Resumo Executivo, 3. Forças, 4. Fraquezas, \
5. Oportunidades, 6. Ameaças, 7. Plano de Ação Priorizado (30 dias, 3-6 meses, 6-12 meses), \
8. Considerações Finais.";

const SWOT_BODY: &str = "\
Gere um relatório SWOT estratégico completo para a empresa \"{{companyName}}\" do segmento \"{{segment}}\".

Contexto coletado:
- Diferencial: {{differential}}
- Ponto Forte: {{mainStrength}}
- Ponto Fraco: {{mainWeakness}}
- Oportunidade: {{biggestOpportunity}}
- Ameaça: {{mainThreat}}
- Meta 12 meses: {{mainGoal12m}}
- Desafio: {{dailyChallenge}}

Respostas completas do briefing:
{{record_json}}

Use essas informações para criar recomendações práticas de gestão e marketing.";

/// System instruction and prompt body for one intake kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub kind: IntakeKind,
    pub system_instruction: &'static str,
    pub body: &'static str,
}

/// A template filled in with a record's answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system_instruction: String,
    pub prompt: String,
}

impl PromptTemplate {
    /// The built-in template for `kind`.
    pub fn for_kind(kind: IntakeKind) -> Self {
        match kind {
            IntakeKind::BusinessBriefing => Self {
                kind,
                system_instruction: BUSINESS_BRIEFING_INSTRUCTION,
                body: BUSINESS_BRIEFING_BODY,
            },
            IntakeKind::SwotAnalysis => Self {
                kind,
                system_instruction: SWOT_INSTRUCTION,
                body: SWOT_BODY,
            },
        }
    }

    /// Substitutes every placeholder with the record's answers.
    pub fn render(&self, record: &IntakeRecord) -> RenderedPrompt {
        RenderedPrompt {
            system_instruction: self.system_instruction.to_string(),
            prompt: interpolate(self.body, record),
        }
    }
}

/// Replaces `{{name}}` placeholders in `template`.
pub fn interpolate(template: &str, record: &IntakeRecord) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            if name == RECORD_JSON {
                serde_json::to_string_pretty(record.values()).unwrap_or_else(|_| "{}".to_string())
            } else {
                record.text(name).unwrap_or_else(|| MISSING_VALUE.to_string())
            }
        })
        .into_owned()
}
