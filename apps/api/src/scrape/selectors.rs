// Selector fallback lists and field defaults for profile pages.
// Order matters: earlier selectors target the current page layout, later ones older layouts.

pub const NAME_SELECTORS: &[&str] = &[
    "h1.text-heading-xlarge",
    "h1",
    ".pv-text-details__left-panel h1",
    ".ph5 h1",
];

pub const HEADLINE_SELECTORS: &[&str] = &[
    ".text-body-medium.break-words",
    ".pv-text-details__left-panel .text-body-medium",
    ".ph5 .text-body-medium",
];

pub const LOCATION_SELECTORS: &[&str] = &[
    ".text-body-small.inline.t-black--light.break-words",
    ".pv-text-details__left-panel .text-body-small",
    ".ph5 .text-body-small",
];

pub const ABOUT_SELECTORS: &[&str] = &[
    ".pv-shared-text-with-see-more .full-width",
    ".display-flex.ph5 .pv-shared-text-with-see-more",
    ".artdeco-card .pv-shared-text-with-see-more",
];

pub const EXPERIENCE_SELECTORS: &[&str] = &[
    ".pvs-list__paged-list-item",
    ".experience-section .pv-entity__summary-info",
    ".pv-profile-section__card-item-v2",
];

pub const EDUCATION_SELECTORS: &[&str] = &[
    ".education-section .pv-entity__summary-info",
    ".pvs-list__paged-list-item .pvs-entity",
    ".pv-profile-section__card-item-v2",
];

pub const SKILL_SELECTORS: &[&str] = &[
    ".pv-skill-category-entity__name-text",
    ".pvs-list__paged-list-item .mr1",
    ".skill-category-entity__name",
];

pub const NAME_PLACEHOLDER: &str = "Name not found";
pub const HEADLINE_PLACEHOLDER: &str = "Professional";
pub const LOCATION_PLACEHOLDER: &str = "Location not specified";
pub const ABOUT_PLACEHOLDER: &str = "No about section available";

pub const MAX_EXPERIENCE: usize = 5;
pub const MAX_EDUCATION: usize = 3;
pub const MAX_SKILLS: usize = 10;

/// Headlines this short are icon labels or button captions, not real headlines.
pub const MIN_HEADLINE_CHARS: usize = 10;
pub const MIN_EXPERIENCE_CHARS: usize = 20;
pub const MIN_EDUCATION_CHARS: usize = 15;
pub const MAX_SKILL_CHARS: usize = 50;
