//! Normalises raw candidate answers into the fact vocabulary the catalog reads.

use serde::{Deserialize, Serialize};

use super::facts::{keys, Facts};

pub const MAX_EDUCATIONS: usize = 5;
pub const MAX_EXPERIENCE_YEARS: u8 = 20;

pub const STEM_COURSE_OPTIONS: &[&str] = &[
    "Introduction to Computer Science",
    "Data Structures and Algorithms",
    "Object-Oriented Programming",
    "Python Programming",
    "Java Programming",
    "C/C++ Programming",
    "Web Development",
    "Mobile App Development",
    "Database Management Systems",
    "Operating Systems",
    "Computer Networks",
    "Software Engineering",
    "Agile Software Development",
    "Scrum Master Fundamentals",
    "DevOps Principles",
    "Cloud Computing",
    "Machine Learning",
    "Artificial Intelligence",
    "Expert Systems",
    "Calculus I",
    "Calculus II",
    "Linear Algebra",
    "Discrete Mathematics",
    "Probability and Statistics",
    "Numerical Methods",
    "Data Science Fundamentals",
    "Big Data Analytics",
    "Data Visualization",
    "Data Architecture",
    "Data Engineering",
    "Physics I",
    "Physics II",
    "Chemistry I",
    "Biology I",
    "Environmental Science",
    "Other",
];

pub const CERT_PMI_LEAN: &str = "PMI Lean Project Management Certification";
pub const CERT_CSM: &str = "Certified Scrum Master (CSM)";
pub const CERT_AWS: &str = "AWS Certified Developer";
pub const CERT_AZURE: &str = "Microsoft Certified: Azure Developer";
pub const CERT_GCP: &str = "Google Professional Data Engineer";
pub const CERT_CISSP: &str = "Certified Information Systems Security Professional (CISSP)";
pub const CERT_PMP: &str = "Project Management Professional (PMP)";

pub const CERT_OPTIONS: &[&str] = &[
    CERT_PMI_LEAN,
    CERT_CSM,
    CERT_AWS,
    CERT_AZURE,
    CERT_GCP,
    CERT_CISSP,
    CERT_PMP,
    "Other",
];

/// Course group behind one coursework flag, with the free-text phrases that also count.
struct CourseGroup {
    fact: &'static str,
    courses: &'static [&'static str],
    phrases: &'static [&'static str],
}

const COURSE_GROUPS: &[CourseGroup] = &[
    CourseGroup {
        fact: keys::PYTHON_COURSEWORK,
        courses: &[
            "Python Programming",
            "Introduction to Computer Science",
            "Data Structures and Algorithms",
            "Object-Oriented Programming",
        ],
        phrases: &["python"],
    },
    CourseGroup {
        fact: keys::SE_COURSEWORK,
        courses: &[
            "Software Engineering",
            "Object-Oriented Programming",
            "DevOps Principles",
        ],
        phrases: &["software engineering"],
    },
    CourseGroup {
        fact: keys::AGILE_COURSEWORK,
        courses: &[
            "Agile Software Development",
            "Scrum Master Fundamentals",
            "DevOps Principles",
        ],
        phrases: &["agile", "scrum", "kanban"],
    },
    CourseGroup {
        fact: keys::EXPERT_SYSTEMS_COURSEWORK,
        courses: &["Expert Systems", "Artificial Intelligence", "Machine Learning"],
        phrases: &["expert system", "artificial intelligence"],
    },
    CourseGroup {
        fact: keys::DATA_COURSEWORK,
        courses: &[
            "Data Science Fundamentals",
            "Big Data Analytics",
            "Data Visualization",
            "Data Architecture",
            "Data Engineering",
            "Database Management Systems",
        ],
        phrases: &["data engineering", "data architecture"],
    },
];

/// Certification flag; an empty phrase list means only an explicit selection counts.
struct CertificationRule {
    fact: &'static str,
    certification: &'static str,
    phrases: &'static [&'static str],
}

const CERTIFICATION_RULES: &[CertificationRule] = &[
    CertificationRule {
        fact: keys::HAS_PMI_LEAN,
        certification: CERT_PMI_LEAN,
        phrases: &["pmi lean"],
    },
    CertificationRule {
        fact: keys::HAS_CSM,
        certification: CERT_CSM,
        phrases: &["scrum master"],
    },
    CertificationRule {
        fact: keys::HAS_PMP,
        certification: CERT_PMP,
        phrases: &["pmp"],
    },
    CertificationRule {
        fact: keys::HAS_AWS,
        certification: CERT_AWS,
        phrases: &[],
    },
    CertificationRule {
        fact: keys::HAS_AZURE,
        certification: CERT_AZURE,
        phrases: &[],
    },
    CertificationRule {
        fact: keys::HAS_GCP,
        certification: CERT_GCP,
        phrases: &[],
    },
    CertificationRule {
        fact: keys::HAS_CISSP,
        certification: CERT_CISSP,
        phrases: &[],
    },
];

/// Degree levels offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Doctorate,
    Professional,
    Master,
    Bachelor,
    Associate,
    HighSchool,
}

impl DegreeLevel {
    pub const fn ordered() -> [DegreeLevel; 6] {
        [
            DegreeLevel::Doctorate,
            DegreeLevel::Professional,
            DegreeLevel::Master,
            DegreeLevel::Bachelor,
            DegreeLevel::Associate,
            DegreeLevel::HighSchool,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            DegreeLevel::Doctorate => "Doctoral Degree (Ph.D., D.B.A., Ed.D.)",
            DegreeLevel::Professional => "Professional Degree (J.D., M.D., Pharm.D.)",
            DegreeLevel::Master => "Master's Degree (M.A., M.S., M.B.A.)",
            DegreeLevel::Bachelor => "Bachelor's Degree (B.A., B.S., B.F.A.)",
            DegreeLevel::Associate => "Associate Degree (A.A., A.S.)",
            DegreeLevel::HighSchool => "High School Diploma or GED",
        }
    }

    /// Professional degrees rank alongside master's degrees.
    pub const fn rank(self) -> u8 {
        match self {
            DegreeLevel::HighSchool => 0,
            DegreeLevel::Associate => 1,
            DegreeLevel::Bachelor => 2,
            DegreeLevel::Master | DegreeLevel::Professional => 3,
            DegreeLevel::Doctorate => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeField {
    ComputerScience,
    SoftwareEngineering,
    InformationTechnology,
    Cybersecurity,
    DataScience,
    ComputerEngineering,
    ManagementInformationSystems,
    Other,
}

impl DegreeField {
    pub const fn ordered() -> [DegreeField; 8] {
        [
            DegreeField::ComputerScience,
            DegreeField::SoftwareEngineering,
            DegreeField::InformationTechnology,
            DegreeField::Cybersecurity,
            DegreeField::DataScience,
            DegreeField::ComputerEngineering,
            DegreeField::ManagementInformationSystems,
            DegreeField::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            DegreeField::ComputerScience => "Computer Science",
            DegreeField::SoftwareEngineering => "Software Engineering/Applications",
            DegreeField::InformationTechnology => "Information Technology",
            DegreeField::Cybersecurity => "Cybersecurity/Information Assurance",
            DegreeField::DataScience => "Data Science/Data Processing",
            DegreeField::ComputerEngineering => "Computer Engineering",
            DegreeField::ManagementInformationSystems => "Management Information Systems",
            DegreeField::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub level: DegreeLevel,
    pub field: DegreeField,
}

/// Years of professional experience per discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceYears {
    pub python: u8,
    pub data: u8,
    pub expert_systems: u8,
    pub project_mgmt: u8,
    pub agile: u8,
    pub data_architecture: u8,
}

impl ExperienceYears {
    fn entries(&self) -> [(&'static str, u8); 6] {
        [
            (keys::PYTHON_YEARS, self.python),
            (keys::DATA_YEARS, self.data),
            (keys::EXPERT_SYSTEMS_YEARS, self.expert_systems),
            (keys::PROJECT_MGMT_YEARS, self.project_mgmt),
            (keys::AGILE_YEARS, self.agile),
            (keys::DATA_ARCHITECTURE_YEARS, self.data_architecture),
        ]
    }
}

/// Raw candidate answers as collected by a form or API client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub courses_other: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub certifications_other: Option<String>,
    #[serde(default)]
    pub experience: ExperienceYears,
    #[serde(default)]
    pub has_git: bool,
}

/// Form option paired with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeOption<T> {
    pub value: T,
    pub label: &'static str,
}

/// Everything a form or API client needs to collect a valid [`CandidateProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeVocabulary {
    pub degree_levels: Vec<IntakeOption<DegreeLevel>>,
    pub degree_fields: Vec<IntakeOption<DegreeField>>,
    pub courses: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub max_educations: usize,
    pub max_experience_years: u8,
}

impl IntakeVocabulary {
    /// Options in display order, highest degree first.
    pub fn offered() -> Self {
        Self {
            degree_levels: DegreeLevel::ordered()
                .into_iter()
                .map(|level| IntakeOption {
                    value: level,
                    label: level.label(),
                })
                .collect(),
            degree_fields: DegreeField::ordered()
                .into_iter()
                .map(|field| IntakeOption {
                    value: field,
                    label: field.label(),
                })
                .collect(),
            courses: STEM_COURSE_OPTIONS,
            certifications: CERT_OPTIONS,
            max_educations: MAX_EDUCATIONS,
            max_experience_years: MAX_EXPERIENCE_YEARS,
        }
    }
}

/// Answers outside the ranges the intake form offers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("at most {max} degrees may be listed (found {found})")]
    TooManyEducations { max: usize, found: usize },
    #[error("{field} must be between 0 and {max} years (found {found})")]
    ExperienceOutOfRange {
        field: &'static str,
        max: u8,
        found: u8,
    },
    #[error("'{0}' is not one of the offered courses")]
    UnknownCourse(String),
    #[error("'{0}' is not one of the offered certifications")]
    UnknownCertification(String),
}

impl CandidateProfile {
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.educations.len() > MAX_EDUCATIONS {
            return Err(IntakeError::TooManyEducations {
                max: MAX_EDUCATIONS,
                found: self.educations.len(),
            });
        }

        if let Some((field, found)) = self
            .experience
            .entries()
            .into_iter()
            .find(|(_, years)| *years > MAX_EXPERIENCE_YEARS)
        {
            return Err(IntakeError::ExperienceOutOfRange {
                field,
                max: MAX_EXPERIENCE_YEARS,
                found,
            });
        }

        if let Some(course) = self
            .courses
            .iter()
            .find(|course| !STEM_COURSE_OPTIONS.contains(&course.as_str()))
        {
            return Err(IntakeError::UnknownCourse(course.clone()));
        }

        if let Some(certification) = self
            .certifications
            .iter()
            .find(|certification| !CERT_OPTIONS.contains(&certification.as_str()))
        {
            return Err(IntakeError::UnknownCertification(certification.clone()));
        }

        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Flatten the answers into the fact mapping consumed by the engine.
    pub fn facts(&self) -> Facts {
        let mut facts = Facts::new()
            .with(keys::FIRST_NAME, self.first_name.as_str())
            .with(keys::LAST_NAME, self.last_name.as_str());

        self.education_facts(&mut facts);
        self.course_facts(&mut facts);
        self.certification_facts(&mut facts);

        facts.extend(self.experience.entries());
        facts.insert(keys::AGILE_PROJECTS, self.experience.agile > 0);
        facts.insert(keys::HAS_GIT, self.has_git);
        facts
    }

    fn education_facts(&self, facts: &mut Facts) {
        let mut highest: Option<DegreeLevel> = None;
        for education in &self.educations {
            if highest.map_or(true, |level| education.level.rank() > level.rank()) {
                highest = Some(education.level);
            }
        }
        if let Some(level) = highest {
            facts.insert(keys::HIGHEST_DEGREE_OBTAINED, level.label());
        }

        let cs_rank = |minimum: DegreeLevel| {
            self.educations.iter().any(|education| {
                education.field == DegreeField::ComputerScience
                    && education.level.rank() >= minimum.rank()
            })
        };
        facts.insert(keys::HAS_BACHELORS_CS, cs_rank(DegreeLevel::Bachelor));
        facts.insert(keys::HAS_MASTERS_CS, cs_rank(DegreeLevel::Master));
    }

    fn course_facts(&self, facts: &mut Facts) {
        let other = lowercase(self.courses_other.as_deref());
        for group in COURSE_GROUPS {
            let selected = self
                .courses
                .iter()
                .any(|course| group.courses.contains(&course.as_str()));
            let mentioned = group.phrases.iter().any(|phrase| other.contains(phrase));
            facts.insert(group.fact, selected || mentioned);
        }

        facts.insert(keys::COURSES_SELECTED, self.courses.clone());
        if let Some(text) = &self.courses_other {
            facts.insert(keys::COURSES_OTHER, text.as_str());
        }
    }

    fn certification_facts(&self, facts: &mut Facts) {
        let other = lowercase(self.certifications_other.as_deref());
        for rule in CERTIFICATION_RULES {
            let selected = self
                .certifications
                .iter()
                .any(|certification| certification == rule.certification);
            let mentioned = rule.phrases.iter().any(|phrase| other.contains(phrase));
            facts.insert(rule.fact, selected || mentioned);
        }

        facts.insert(keys::CERTS_SELECTED, self.certifications.clone());
        if let Some(text) = &self.certifications_other {
            facts.insert(keys::CERTS_OTHER, text.as_str());
        }
    }
}

fn lowercase(text: Option<&str>) -> String {
    text.unwrap_or_default().to_lowercase()
}
