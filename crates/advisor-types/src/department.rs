//! Static department catalog and the keyword table used to guess a
//! department from the user's question.

pub const DEFAULT_DEPARTMENT: &str = "MSFEA Advisor";
pub const DEFAULT_ICON: &str = "images/msfea_logo.png";

/// An academic unit the backend may attribute a response to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const DEPARTMENTS: [Department; 6] = [
    Department {
        id: "msfea",
        name: DEFAULT_DEPARTMENT,
        icon: DEFAULT_ICON,
        description: "General faculty information",
    },
    Department {
        id: "chee",
        name: "Chemical Engineering",
        icon: "images/department_icons/chemical.png",
        description: "CHEE department",
    },
    Department {
        id: "mech",
        name: "Mechanical Engineering",
        icon: "images/department_icons/mechanical.png",
        description: "MECH department",
    },
    Department {
        id: "cee",
        name: "Civil Engineering",
        icon: "images/department_icons/civil.png",
        description: "CEE department",
    },
    Department {
        id: "ece",
        name: "Electrical & Computer",
        icon: "images/department_icons/ece.png",
        description: "ECE department",
    },
    Department {
        id: "enmg",
        name: "Industrial Engineering",
        icon: "images/department_icons/industrial.png",
        description: "ENMG department",
    },
];

/// Keyword → department, scanned in order; the first hit wins.
/// Some targets are backend names that are not in the catalog.
pub const DEPARTMENT_KEYWORDS: &[(&str, &str)] = &[
    ("mechanical", "Mechanical Engineering"),
    ("mech", "Mechanical Engineering"),
    ("civil", "Civil Engineering"),
    ("cee", "Civil Engineering"),
    ("electrical", "Electrical & Computer Engineering"),
    ("ece", "Electrical & Computer"),
    ("computer", "Electrical & Computer"),
    ("chemical", "Chemical Engineering"),
    ("chee", "Chemical Engineering"),
    ("industrial", "Industrial Engineering"),
    ("enmg", "Industrial Engineering"),
    ("cse", "Computer Science and Engineering"),
    ("cce", "Computer and Communications Engineering"),
];

const DISPLAY_ALIASES: &[(&str, &str)] = &[
    ("Computer Science Engineering", "CSE"),
    ("Computer & Communications Engineering", "CCE"),
];

pub fn find(name: &str) -> Option<&'static Department> {
    DEPARTMENTS.iter().find(|d| d.name == name)
}

/// Catalog icon for a department name, falling back to the faculty logo
pub fn icon_for(name: &str) -> &'static str {
    find(name).map(|d| d.icon).unwrap_or(DEFAULT_ICON)
}

/// Short label used in headers; unknown names display as themselves
pub fn display_name(name: &str) -> &str {
    DISPLAY_ALIASES
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

pub fn is_default(name: &str) -> bool {
    name == DEFAULT_DEPARTMENT
}
