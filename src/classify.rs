use std::fmt;

/// Role categories a posting can be bucketed into, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    HigherManagement,
    MachineLearning,
    DataScientist,
    DataEngineer,
    DataAnalytics,
    AiEngineer,
    Fullstack,
    Backend,
    Frontend,
    MobileEngineer,
    SoftwareEngineering,
    Qa,
    ItArchitect,
    DevOpsCloud,
    CyberSecurity,
    ProductOwner,
    BusinessAnalyst,
    ProjectManager,
    UiUx,
    Marketing,
    Other,
}

/// Ordered keyword rules. The first rule with any keyword contained in the
/// lower-cased title decides the role, so the order here is load-bearing.
const RULES: &[(&[&str], Role)] = &[
    (&["head", "leitung", "director"], Role::HigherManagement),
    (&["machine learning"], Role::MachineLearning),
    (&["data scientist", "data science"], Role::DataScientist),
    (&["data engineer"], Role::DataEngineer),
    (&["data analytics", "data analyst"], Role::DataAnalytics),
    (&["ai"], Role::AiEngineer),
    (&["fullstack"], Role::Fullstack),
    (&["backend"], Role::Backend),
    (&["frontend"], Role::Frontend),
    (&["mobile"], Role::MobileEngineer),
    (&["software engineer"], Role::SoftwareEngineering),
    (&["qa", "test"], Role::Qa),
    (&["architect"], Role::ItArchitect),
    (&["devops", "cloud"], Role::DevOpsCloud),
    (&["cyber", "security"], Role::CyberSecurity),
    (&["product owner"], Role::ProductOwner),
    (&["business analyst"], Role::BusinessAnalyst),
    (
        &["projekt manager", "projektmanager", "project manager"],
        Role::ProjectManager,
    ),
    (&["ux", "ui"], Role::UiUx),
    (&["marketing"], Role::Marketing),
];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::HigherManagement => "Higher level management",
            Role::MachineLearning => "Machine Learning",
            Role::DataScientist => "Data Scientist",
            Role::DataEngineer => "Data Engineer",
            Role::DataAnalytics => "Data Analytics",
            Role::AiEngineer => "AI Engineer",
            Role::Fullstack => "Fullstack",
            Role::Backend => "Backend",
            Role::Frontend => "Frontend",
            Role::MobileEngineer => "Mobile Engineer",
            Role::SoftwareEngineering => "Software Engineering",
            Role::Qa => "QA",
            Role::ItArchitect => "IT Architect",
            Role::DevOpsCloud => "DevOps / Cloud",
            Role::CyberSecurity => "Cyber Security",
            Role::ProductOwner => "Product Owner",
            Role::BusinessAnalyst => "Business Analyst",
            Role::ProjectManager => "Project Manager",
            Role::UiUx => "UI/UX",
            Role::Marketing => "Marketing",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a free-text job title onto a [`Role`]. Never fails; unmatched titles
/// land in [`Role::Other`].
pub fn categorize(title: &str) -> Role {
    let lower = title.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, role)| *role)
        .unwrap_or(Role::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_of_anything_is_management() {
        for title in ["Head of Data", "Head of Engineering", "Head of QA & Test"] {
            assert_eq!(categorize(title), Role::HigherManagement, "{title}");
        }
        assert_eq!(categorize("Teamleitung Backend"), Role::HigherManagement);
        assert_eq!(categorize("IT Director"), Role::HigherManagement);
    }

    #[test]
    fn known_titles() {
        assert_eq!(categorize("Machine Learning Engineer"), Role::MachineLearning);
        assert_eq!(categorize("QA Tester"), Role::Qa);
        assert_eq!(categorize("Backend Engineer"), Role::Backend);
        assert_eq!(categorize("Projekt Manager"), Role::ProjectManager);
        assert_eq!(categorize("Senior Software Engineer"), Role::SoftwareEngineering);
        assert_eq!(categorize("UX Designer"), Role::UiUx);
        assert_eq!(categorize("Marketing Manager"), Role::Marketing);
    }

    #[test]
    fn earlier_rule_wins() {
        // data science (3) before data engineer (4)
        assert_eq!(
            categorize("Data Engineer (Data Science Team)"),
            Role::DataScientist
        );
        // architect (13) before cloud (14)
        assert_eq!(categorize("Cloud Architect"), Role::ItArchitect);
        // "ai" is a plain substring, so it catches words like "Maintenance"
        assert_eq!(categorize("Maintenance Technician"), Role::AiEngineer);
        assert_eq!(categorize("Test Automation Engineer (Python)"), Role::Qa);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(categorize("FULLSTACK DEVELOPER"), Role::Fullstack);
        assert_eq!(categorize("frontend developer"), Role::Frontend);
    }

    #[test]
    fn unmatched_is_other() {
        assert_eq!(categorize("Random Job"), Role::Other);
        assert_eq!(categorize(""), Role::Other);
    }

    #[test]
    fn labels() {
        assert_eq!(Role::DevOpsCloud.to_string(), "DevOps / Cloud");
        assert_eq!(Role::HigherManagement.as_str(), "Higher level management");
        assert_eq!(RULES.len(), 20);
    }
}
