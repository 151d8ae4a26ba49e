//! Questionnaire catalog
//!
//! The 84 COPSOQ III items as presented on the form, grouped into eight
//! themed sections. Section grouping is a presentation concern and does not
//! follow scale membership.

use serde::{Deserialize, Serialize};

/// Themed section of the form, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    WorkloadAndEnvironment,
    EmotionalDemandsAndAutonomy,
    DevelopmentAndMeaning,
    LeadershipAndRelations,
    SocialSupportAndRole,
    CommunitySecurityAndJustice,
    TrustAndBalance,
    SatisfactionAndHealth,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::WorkloadAndEnvironment,
        Section::EmotionalDemandsAndAutonomy,
        Section::DevelopmentAndMeaning,
        Section::LeadershipAndRelations,
        Section::SocialSupportAndRole,
        Section::CommunitySecurityAndJustice,
        Section::TrustAndBalance,
        Section::SatisfactionAndHealth,
    ];

    /// Section title as shown on the form
    pub fn title(&self) -> &'static str {
        match self {
            Section::WorkloadAndEnvironment => "Ambiente e Carga de Trabalho",
            Section::EmotionalDemandsAndAutonomy => "Exigências Emocionais e Autonomia",
            Section::DevelopmentAndMeaning => "Desenvolvimento e Significado",
            Section::LeadershipAndRelations => "Liderança, Gestão e Relações",
            Section::SocialSupportAndRole => "Apoio Social e Papel no Trabalho",
            Section::CommunitySecurityAndJustice => "Comunidade, Segurança e Justiça",
            Section::TrustAndBalance => "Confiança e Equilíbrio Pessoal",
            Section::SatisfactionAndHealth => "Satisfação e Saúde Geral",
        }
    }
}

/// One questionnaire item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 1-based ordinal
    pub number: usize,
    pub text: &'static str,
    pub section: Section,
}

const fn q(number: usize, section: Section, text: &'static str) -> Question {
    Question {
        number,
        text,
        section,
    }
}

use Section::*;

/// All items, in question order
pub const QUESTIONS: [Question; 84] = [
    q(1, WorkloadAndEnvironment, "A sua carga de trabalho acumula-se por ser mal distribuída?"),
    q(2, WorkloadAndEnvironment, "Com que frequência fica com trabalho atrasado?"),
    q(3, WorkloadAndEnvironment, "Com que frequência não tem tempo para completar todas as suas tarefas do seu trabalho?"),
    q(4, WorkloadAndEnvironment, "Precisa de trabalhar muito rapidamente?"),
    q(5, WorkloadAndEnvironment, "Trabalha a um ritmo elevado ao longo de toda a jornada de trabalho?"),
    q(6, WorkloadAndEnvironment, "O seu trabalho exige a sua atenção constante?"),
    q(7, WorkloadAndEnvironment, "O seu trabalho requer que memorize muitas informações?"),
    q(8, WorkloadAndEnvironment, "O seu trabalho requer que seja bom a propor novas ideias?"),
    q(9, WorkloadAndEnvironment, "O seu trabalho exige que tome decisões difíceis?"),
    q(10, EmotionalDemandsAndAutonomy, "O seu trabalho coloca-o/a em situações emocionalmente perturbadoras?"),
    q(11, EmotionalDemandsAndAutonomy, "No seu trabalho tem de lidar com os problemas pessoais de outras pessoas?"),
    q(12, EmotionalDemandsAndAutonomy, "O seu trabalho exige emocionalmente de si?"),
    q(13, EmotionalDemandsAndAutonomy, "Tem um elevado grau de influência nas decisões sobre o seu trabalho?"),
    q(14, EmotionalDemandsAndAutonomy, "Pode influenciar a quantidade de trabalho que lhe compete a si?"),
    q(15, EmotionalDemandsAndAutonomy, "Tem influência sobre o que faz no seu trabalho?"),
    q(16, EmotionalDemandsAndAutonomy, "Tem influência sobre como faz o seu trabalho?"),
    q(17, DevelopmentAndMeaning, "O seu trabalho dá-lhe a possibilidade de aprender coisas novas?"),
    q(18, DevelopmentAndMeaning, "No seu trabalho, consegue usar as suas competências e conhecimentos?"),
    q(19, DevelopmentAndMeaning, "O seu trabalho dá-lhe oportunidade para desenvolver as suas competências?"),
    q(20, EmotionalDemandsAndAutonomy, "Pode decidir quando fazer uma pausa?"),
    q(21, EmotionalDemandsAndAutonomy, "Geralmente, pode tirar férias quando quer?"),
    q(22, EmotionalDemandsAndAutonomy, "Pode deixar o seu local de trabalho por breves instantes para falar com um colega?"),
    q(23, DevelopmentAndMeaning, "O seu trabalho é significativo para si?"),
    q(24, DevelopmentAndMeaning, "Sente que o trabalho que faz é importante?"),
    q(25, DevelopmentAndMeaning, "Sente-se motivado e envolvido no seu trabalho?"),
    q(26, LeadershipAndRelations, "Gosta de falar sobre o seu local de trabalho com pessoas que não trabalham lá?"),
    q(27, LeadershipAndRelations, "Sente orgulho em pertencer à sua organização?"),
    q(28, LeadershipAndRelations, "É informado com a devida antecedência sobre decisões, mudanças ou planos importantes para o futuro?"),
    q(29, LeadershipAndRelations, "Recebe todas as informações necessárias para fazer bem o seu trabalho?"),
    q(30, LeadershipAndRelations, "O seu trabalho é reconhecido e apreciado pela gerência?"),
    q(31, LeadershipAndRelations, "A gerência respeita os trabalhadores?"),
    q(32, LeadershipAndRelations, "A gerência trata todos os trabalhadores de maneira justa?"),
    q(33, SocialSupportAndRole, "O seu trabalho tem objetivos claros?"),
    q(34, SocialSupportAndRole, "Sabe exatamente quais são as suas áreas de responsabilidade?"),
    q(35, SocialSupportAndRole, "Sabe exatamente o que se espera de si no trabalho?"),
    q(36, SocialSupportAndRole, "No seu trabalho são-lhe solicitadas exigências contraditórias?"),
    q(37, SocialSupportAndRole, "Tem que fazer coisas que parecem ser de modo diferente de como teriam sido planejadas?"),
    q(38, SocialSupportAndRole, "Tem que fazer coisas que lhe parecem desnecessárias?"),
    q(39, LeadershipAndRelations, "A sua chefia imediata garante que os trabalhadores tenham boas oportunidades de desenvolvimento?"),
    q(40, LeadershipAndRelations, "A sua chefia imediata é adequada no planejamento do trabalho?"),
    q(41, LeadershipAndRelations, "A sua chefia imediata é adequada na resolução de conflitos?"),
    q(42, LeadershipAndRelations, "A sua chefia imediata prioriza a satisfação no trabalho?"),
    q(43, SocialSupportAndRole, "Se necessário, consegue apoio e ajuda dos seus colegas para o trabalho?"),
    q(44, SocialSupportAndRole, "Se necessário, os seus colegas ouvem os seus problemas relacionados com o trabalho?"),
    q(45, SocialSupportAndRole, "Os seus colegas falam consigo sobre o seu desempenho no trabalho?"),
    q(46, SocialSupportAndRole, "Se necessário, a sua chefia imediata ouve os seus problemas relacionados com o trabalho?"),
    q(47, SocialSupportAndRole, "Se necessário, consegue apoio e ajuda da sua chefia imediata para o trabalho?"),
    q(48, SocialSupportAndRole, "A sua chefia imediata fala consigo sobre o seu desempenho no trabalho?"),
    q(49, CommunitySecurityAndJustice, "Existe um bom clima de trabalho entre os colegas?"),
    q(50, CommunitySecurityAndJustice, "Sente-se parte de uma equipe no seu local de trabalho?"),
    q(51, CommunitySecurityAndJustice, "Existe uma boa cooperação entre os colegas de trabalho?"),
    q(52, CommunitySecurityAndJustice, "Está preocupado em vir a ficar desempregado?"),
    q(53, CommunitySecurityAndJustice, "Está preocupado com a dificuldade em encontrar outro emprego, caso seja despedido?"),
    q(54, CommunitySecurityAndJustice, "Está preocupado em ser transferido para outro departamento ou função contra a sua vontade?"),
    q(55, CommunitySecurityAndJustice, "Está preocupado com a possibilidade de o seu cronograma de trabalho ser alterado contra a sua vontade?"),
    q(56, CommunitySecurityAndJustice, "Está preocupado com a possibilidade de o seu rendimento diminuir?"),
    q(57, TrustAndBalance, "Está satisfeito com a qualidade do trabalho que executa?"),
    q(58, TrustAndBalance, "No geral, os empregados confiam uns nos outros?"),
    q(59, TrustAndBalance, "Os empregados escondem informações uns dos outros?"),
    q(60, TrustAndBalance, "Os empregados escondem informações da gerência?"),
    q(61, TrustAndBalance, "A gerência confia nos empregados para fazerem bem o seu trabalho?"),
    q(62, TrustAndBalance, "Os empregados confiam na informação que recebem da gerência?"),
    q(63, TrustAndBalance, "Os empregados podem expressar os seus sentimentos e pontos de vista à gerência?"),
    q(64, CommunitySecurityAndJustice, "Os conflitos no seu local de trabalho são resolvidos de modo justo?"),
    q(65, CommunitySecurityAndJustice, "O trabalho é distribuído de forma justa?"),
    q(66, CommunitySecurityAndJustice, "As sugestões dos trabalhadores são tratadas de forma séria pela gestão de topo?"),
    q(67, CommunitySecurityAndJustice, "Quando os trabalhadores fazem um bom trabalho são reconhecidos?"),
    q(68, TrustAndBalance, "Sente que o seu trabalho lhe exige tanta energia, que acaba por afetar a sua vida privada / familiar negativamente?"),
    q(69, TrustAndBalance, "Sente que o seu trabalho lhe exige tanto tempo, que acaba por afetar a sua vida privada / familiar negativamente?"),
    q(70, TrustAndBalance, "As exigências do seu trabalho interferem com a sua vida privada e familiar?"),
    q(71, SatisfactionAndHealth, "As suas perspetivas de trabalho?"),
    q(72, SatisfactionAndHealth, "O seu trabalho de uma forma global?"),
    q(73, SatisfactionAndHealth, "A forma como as suas capacidades e competências são usadas?"),
    q(74, SatisfactionAndHealth, "Em geral, sente que a sua saúde é:"),
    q(75, SatisfactionAndHealth, "Sou sempre capaz de resolver problemas se tentar o suficiente."),
    q(76, SatisfactionAndHealth, "É fácil seguir os meus planos e atingir os meus objectivos."),
    q(77, SatisfactionAndHealth, "Sentiu dificuldade em adormecer?"),
    q(78, SatisfactionAndHealth, "Acordou várias vezes durante a noite e depois não conseguia adormecer novamente?"),
    q(79, SatisfactionAndHealth, "Tem-se sentido fisicamente exausto/a?"),
    q(80, SatisfactionAndHealth, "Tem-se sentido emocionalmente exausto/a?"),
    q(81, SatisfactionAndHealth, "Tem-se sentido tenso/a?"),
    q(82, SatisfactionAndHealth, "Tem-se sentido triste ou deprimido/a?"),
    q(83, SatisfactionAndHealth, "Tem tido falta de interesse pelas suas atividades diárias?"),
    q(84, SatisfactionAndHealth, "Tem tido falta de interesse pelas pessoas que o/a rodeiam?"),
];

/// Look up an item by its 1-based number
pub fn question(number: usize) -> Option<&'static Question> {
    number.checked_sub(1).and_then(|index| QUESTIONS.get(index))
}

/// Items of a section, in question order
pub fn section_questions(section: Section) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |q| q.section == section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QUESTION_COUNT;

    #[test]
    fn test_numbers_are_sequential() {
        assert_eq!(QUESTIONS.len(), QUESTION_COUNT);
        for (index, item) in QUESTIONS.iter().enumerate() {
            assert_eq!(item.number, index + 1);
            assert!(!item.text.is_empty());
        }
    }

    #[test]
    fn test_sections_partition_questions() {
        let total: usize = Section::ALL
            .iter()
            .map(|s| section_questions(*s).count())
            .sum();
        assert_eq!(total, QUESTION_COUNT);
        assert!(Section::ALL.iter().all(|s| section_questions(*s).count() > 0));
    }

    #[test]
    fn test_section_sizes() {
        let sizes: Vec<usize> = Section::ALL
            .iter()
            .map(|s| section_questions(*s).count())
            .collect();
        assert_eq!(sizes, vec![9, 10, 6, 11, 12, 12, 10, 14]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(question(58).map(|q| q.section), Some(Section::TrustAndBalance));
        assert!(question(0).is_none());
        assert!(question(85).is_none());
    }
}
