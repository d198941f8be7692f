//! Built-in step catalogs for each intake kind.

use super::record::IntakeKind;
use super::step::{FieldSpec, StepDefinition, StepSchema};
use super::validator::RuleKind;

/// Returns the built-in schema for `kind`.
pub fn schema_for(kind: IntakeKind) -> StepSchema {
    match kind {
        IntakeKind::BusinessBriefing => StepSchema::from_catalog(business_briefing_steps()),
        IntakeKind::SwotAnalysis => StepSchema::from_catalog(swot_analysis_steps()),
    }
}

fn req(name: &str, label: &str) -> FieldSpec {
    FieldSpec::text(name, label).required()
}

fn opt(name: &str, label: &str) -> FieldSpec {
    FieldSpec::text(name, label)
}

fn email(name: &str, label: &str) -> FieldSpec {
    req(name, label).with_rule(RuleKind::Email)
}

fn phone(name: &str, label: &str) -> FieldSpec {
    req(name, label).with_rule(RuleKind::PhoneBr)
}

fn choices(name: &str, label: &str) -> FieldSpec {
    FieldSpec::multi_select(name, label).required()
}

/// The 13-step marketing diagnosis questionnaire.
pub fn business_briefing_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            0,
            "Empresa",
            vec![
                req("companyName", "Empresa"),
                req("responsibleName", "Responsável"),
                req("role", "Cargo"),
                email("email", "E-mail"),
                phone("phone", "WhatsApp"),
                opt("website", "Site"),
                opt("instagram", "Instagram"),
                opt("facebook", "Facebook"),
                req("location", "Cidade/Estado"),
            ],
        ),
        StepDefinition::new(
            1,
            "Momento",
            vec![
                req("segment", "Segmento"),
                req("businessDescription", "O que faz e para quem"),
                opt("businessAge", "Tempo de Mercado"),
                opt("teamSize", "Equipe"),
                req("serviceType", "Tipo de Atendimento"),
                req("businessMoment", "Momento Atual"),
            ],
        ),
        StepDefinition::new(
            2,
            "Produto",
            vec![
                req("productName", "Produto Principal"),
                req("priceRange", "Faixa de Preço"),
                req("qualityLevel", "Qualidade Percebida"),
                choices("paymentMethods", "Métodos de Pagamento"),
                opt("maxInstallments", "Parcelamento Máximo"),
                req("deliveryTime", "Prazo de Entrega"),
                req("needsBooking", "Precisa de Agendamento"),
                opt("hasWarranty", "Oferece Garantia").with_default("sim"),
                req("warrantyDetails", "Detalhes da Garantia").visible_when("hasWarranty", "sim"),
                req("uniqueDifferential", "Diferencial Único"),
            ],
        ),
        StepDefinition::new(
            3,
            "Negócio",
            vec![
                req("revenue", "Faturamento Mensal"),
                req("mainChallenge", "Maior Desafio de Vendas"),
            ],
        ),
        StepDefinition::new(
            4,
            "Objetivos",
            vec![
                choices("goals", "Objetivos (3-6 meses)"),
                req("numericalMeta", "Meta Numérica"),
                req("agencyExpectation", "Expectativa com a Agência"),
            ],
        ),
        StepDefinition::new(
            5,
            "Essência",
            vec![
                req("mission", "Missão"),
                req("vision", "Visão"),
                req("values", "Valores"),
            ],
        ),
        StepDefinition::new(
            6,
            "Público",
            vec![
                req("idealCustomer", "Cliente Ideal"),
                req("targetRegions", "Regiões de Atendimento"),
                req("incomeLevel", "Poder Aquisitivo"),
                opt("leadSources", "Origem dos Clientes"),
                req("bestLeadChannel", "Melhor Canal de Clientes"),
            ],
        ),
        StepDefinition::new(
            7,
            "Digital",
            vec![
                opt("postFrequency", "Frequência de Postagem"),
                opt("socialCaretaker", "Quem Cuida das Redes"),
                req("hasAds", "Investe em Anúncios"),
                opt("adsExperience", "Experiência com Anúncios"),
                req("hasGMB", "Google Meu Negócio"),
            ],
        ),
        StepDefinition::new(
            8,
            "Vendas",
            vec![
                choices("contactChannels", "Canais de Atendimento"),
                FieldSpec::scale("serviceRating", "Nota do Atendimento (0-10)", 0.0, 10.0),
                req("ratingReason", "Motivo da Nota"),
                req("improvementArea", "Onde Melhorar"),
                req("lostSalesChannel", "Canal com Mais Perdas"),
                req("biggestWeakness", "Maior Ponto Fraco"),
                req("lossScenario", "Venda Perdida Recente"),
                opt("hasSalesTraining", "Treinamento de Vendas").with_default("Não"),
                opt("wouldTrainingHelp", "Treinamento Ajudaria").with_default("Sim"),
            ],
        ),
        StepDefinition::new(
            9,
            "Concorrência",
            vec![
                req("topCompetitors", "Principais Concorrentes"),
                opt("competitorAdvantages", "Vantagens dos Concorrentes"),
                req("ownAdvantages", "Suas Vantagens"),
                req("competitorAdSpend", "Investimento dos Concorrentes"),
            ],
        ),
        StepDefinition::new(
            10,
            "Investimento",
            vec![
                req("investmentBudget", "Investimento Mensal"),
                req("startTime", "Quando Iniciar"),
            ],
        ),
        StepDefinition::new(
            11,
            "Histórico",
            vec![
                opt("previousExperience", "Experiência Anterior"),
                req("whatNotToDo", "O que Não Fazer"),
                opt("extraInfo", "Informações Extras"),
            ],
        ),
        StepDefinition::terminal(12, "Finalizar", vec![]),
    ]
}

/// The 9-step SWOT strategic audit.
pub fn swot_analysis_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            0,
            "Cadastro",
            vec![
                req("name", "Nome do Gestor"),
                email("email", "E-mail"),
                phone("phone", "WhatsApp"),
                opt("whatsapp", "WhatsApp Alternativo").with_rule(RuleKind::PhoneBr),
            ],
        ),
        StepDefinition::new(
            1,
            "Empresa",
            vec![
                req("companyName", "Empresa"),
                req("segment", "Segmento"),
                req("businessTime", "Tempo de Mercado"),
                req("teamSize", "Equipe"),
            ],
        ),
        StepDefinition::new(
            2,
            "Forças",
            vec![
                req("differential", "Diferencial Competitivo"),
                req("mainStrength", "Ponto Forte Principal"),
                opt("qualityRating", "Nota de Qualidade").with_default("5"),
                opt("clientRelationship", "Relacionamento").with_default("Excelente"),
                opt("keyProcess", "Processo Chave"),
                FieldSpec::scale("executionAbility", "Execução (1-5)", 1.0, 5.0).with_default(3),
            ],
        ),
        StepDefinition::new(
            3,
            "Fraquezas",
            vec![
                req("dailyChallenge", "Desafio Diário"),
                req("mainWeakness", "Fraqueza Principal"),
                opt("financialOrg", "Org. Financeira").with_default("Médio"),
                opt("processOrg", "Org. Processos").with_default("Médio"),
                FieldSpec::scale("delegationAbility", "Nível Delegação", 1.0, 5.0).with_default(2),
                opt("specificBottleneck", "Gargalo Específico"),
            ],
        ),
        StepDefinition::new(
            4,
            "Oportunidades",
            vec![
                req("expansionDemand", "Demanda de Expansão"),
                req("biggestOpportunity", "Oportunidade"),
                opt("techUsage", "Uso de Tech").with_default("Sim"),
                opt("customerClarity", "Clareza do Cliente").with_default("Sim"),
                opt("mainGoal6m", "Meta 6 Meses"),
                opt("projectIdea", "Ideia de Projeto"),
            ],
        ),
        StepDefinition::new(
            5,
            "Ameaças",
            vec![
                req("marketConcern", "Preocupação Mercado"),
                req("mainThreat", "Ameaça Principal"),
                opt("competitionRating", "Concorrência").with_default("3"),
                opt("financialHealth", "Saúde Financeira").with_default("Saudável"),
                opt("dependencyLevel", "Dependência de Clientes").with_default("Alta"),
                FieldSpec::scale("adaptationAbility", "Adaptação", 1.0, 5.0).with_default(3),
                opt("currentWorry", "Preocupação Atual"),
            ],
        ),
        StepDefinition::new(
            6,
            "Visão",
            vec![
                req("mainGoal12m", "Meta 12 Meses"),
                req("longTermDream", "Sonho de Longo Prazo"),
                FieldSpec::scale("directionClarity", "Clareza Direção", 1.0, 5.0).with_default(3),
                opt("firstImprovement", "Primeira Melhoria"),
            ],
        ),
        StepDefinition::new(
            7,
            "Disposição",
            vec![
                req("recommendationOpenness", "Abertura").with_default("Total"),
                req("biggestObstacle", "Maior Obstáculo"),
                FieldSpec::scale("changeDisposition", "Disposição Mudança", 1.0, 5.0).with_default(4),
            ],
        ),
        StepDefinition::terminal(
            8,
            "Final",
            vec![opt("plan", "Plano Selecionado").with_default("essencial")],
        ),
    ]
}
