//! Demo auto-fill data for each intake kind.
//!
//! Feeding these through [`WizardEngine::prefill`](super::WizardEngine::prefill)
//! yields a form that passes every step.

use super::field_value::{FieldValue, FieldValues};
use super::record::IntakeKind;

/// Complete sample answers for `kind`.
pub fn demo_values(kind: IntakeKind) -> FieldValues {
    let pairs: Vec<(&str, FieldValue)> = match kind {
        IntakeKind::BusinessBriefing => business_briefing(),
        IntakeKind::SwotAnalysis => swot_analysis(),
    };
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn t(value: &str) -> FieldValue {
    FieldValue::text(value)
}

fn business_briefing() -> Vec<(&'static str, FieldValue)> {
    vec![
        ("companyName", t("Mecânica do Futuro")),
        ("responsibleName", t("Ricardo Almeida")),
        ("role", t("Dono")),
        ("email", t("contato@mecanicafuturo.com.br")),
        ("phone", t("11977778888")),
        ("website", t("www.mecanicafuturo.com.br")),
        ("instagram", t("@mecanicafuturo")),
        ("facebook", t("fb.com/mecanicafuturo")),
        ("location", t("Curitiba - PR")),
        ("segment", t("Automotivo / Oficinas")),
        ("businessDescription", t("Oficina especializada em carros híbridos e elétricos de luxo.")),
        ("businessAge", t("2 anos")),
        ("teamSize", t("8 pessoas")),
        ("serviceType", t("Ambos")),
        ("businessMoment", t("Crescimento")),
        ("productName", t("Manutenção Preventiva de Baterias Híbridas")),
        ("priceRange", t("R$ 1.500–5.000")),
        ("qualityLevel", t("alta/premium")),
        ("paymentMethods", FieldValue::selection(["Cartão de Crédito", "Pix"])),
        ("maxInstallments", t("até 10x")),
        ("deliveryTime", t("1–3 dias")),
        ("needsBooking", t("sim")),
        ("hasWarranty", t("sim")),
        ("warrantyDetails", t("12 meses para peças e 6 meses para mão de obra.")),
        ("uniqueDifferential", t("Única oficina com scanner original Tesla e Porsche na região sul.")),
        ("revenue", t("R$ 80.000 a R$ 150.000")),
        ("mainChallenge", t("Dificuldade em explicar o valor técnico e justificar o preço premium no WhatsApp.")),
        ("goals", FieldValue::selection(["Vender mais", "Gerar leads qualificados", "Automatizar vendas"])),
        ("numericalMeta", t("Dobrar o número de agendamentos mensais (de 15 para 30).")),
        ("agencyExpectation", t("Uma parceria que entenda de tráfego pago.")),
        ("mission", t("Garantir a mobilidade sustentável.")),
        ("vision", t("Ser a oficina nº 1 em tecnologia elétrica.")),
        ("values", t("Inovação, Precisão, Transparência.")),
        ("idealCustomer", t("Público classe A, donos de veículos premium.")),
        ("targetRegions", t("Curitiba e Região Metropolitana")),
        ("incomeLevel", t("Alta Renda")),
        ("leadSources", t("Indicação e Instagram")),
        ("bestLeadChannel", t("Indicação traz os mais qualificados.")),
        ("postFrequency", t("3x por semana")),
        ("socialCaretaker", t("Eu mesmo faço")),
        ("hasAds", t("Sim, mas parou")),
        ("adsExperience", t("Tentei impulsionar posts mas só veio gente perguntando preço básico.")),
        ("hasGMB", t("Sim")),
        ("contactChannels", FieldValue::selection(["WhatsApp", "Telefone"])),
        ("serviceRating", FieldValue::Number(8.0)),
        ("ratingReason", t("Demora em responder orçamentos complexos.")),
        ("improvementArea", t("Agilidade na resposta e follow-up.")),
        ("lostSalesChannel", t("WhatsApp")),
        ("lossScenario", t("Cliente pergunta o preço, passamos o valor técnico e ele para de responder.")),
        ("hasSalesTraining", t("Não")),
        ("wouldTrainingHelp", t("Sim")),
        ("biggestWeakness", t("Não temos um script para contornar objeções de preço.")),
        ("topCompetitors", t("Oficina do Alemão")),
        ("competitorAdvantages", t("Infraestrutura de recepção luxuosa.")),
        ("ownAdvantages", t("Mão de obra técnica superior.")),
        ("competitorAdSpend", t("Igual")),
        ("investmentBudget", t("R$ 3.000 a R$ 5.000")),
        ("startTime", t("Imediato")),
        ("previousExperience", t("Freelancers que faziam artes bonitas mas sem resultado.")),
        ("whatNotToDo", t("Gastar dinheiro apenas com branding sem foco em leads.")),
        ("extraInfo", t("Disponibilidade para reuniões apenas terças de manhã.")),
    ]
}

fn swot_analysis() -> Vec<(&'static str, FieldValue)> {
    vec![
        ("name", t("Carlos Oliveira")),
        ("email", t("carlos@construtoraxyz.com.br")),
        ("phone", t("11977775555")),
        ("companyName", t("Construtora XYZ")),
        ("segment", t("Construção Civil")),
        ("businessTime", t("5 anos")),
        ("teamSize", t("12 pessoas")),
        ("differential", t("Entrega com zero atrasos e garantia estendida de 5 anos.")),
        ("qualityRating", t("4")),
        ("clientRelationship", t("Boa")),
        ("mainStrength", t("Engenharia de ponta.")),
        ("keyProcess", t("Gestão via APP.")),
        ("executionAbility", FieldValue::Number(4.0)),
        ("dailyChallenge", t("Dificuldade em gerenciar fornecedores.")),
        ("financialOrg", t("Médio")),
        ("processOrg", t("Médio")),
        ("mainWeakness", t("Comercial ainda imaturo.")),
        ("delegationAbility", FieldValue::Number(3.0)),
        ("specificBottleneck", t("Orçamentação lenta.")),
        ("expansionDemand", t("Alta procura corporativa.")),
        ("biggestOpportunity", t("Novas tecnologias de construção sustentável.")),
        ("techUsage", t("Parcial")),
        ("customerClarity", t("Sim")),
        ("mainGoal6m", t("Dobrar contratos.")),
        ("projectIdea", t("Showroom digital.")),
        ("marketConcern", t("Alta dos juros.")),
        ("competitionRating", t("4")),
        ("mainThreat", t("Entrada de grandes players nacionais.")),
        ("adaptationAbility", FieldValue::Number(3.0)),
        ("dependencyLevel", t("Média")),
        ("financialHealth", t("Saudável")),
        ("currentWorry", t("Custo de mão de obra.")),
        ("mainGoal12m", t("Ser referência regional.")),
        ("directionClarity", FieldValue::Number(4.0)),
        ("firstImprovement", t("Contratar comercial.")),
        ("longTermDream", t("Expansão para 3 estados.")),
        ("changeDisposition", FieldValue::Number(5.0)),
        ("biggestObstacle", t("Verba de investimento imediato.")),
        ("recommendationOpenness", t("Total")),
    ]
}
