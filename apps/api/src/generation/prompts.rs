// Prompt constants for resume generation.
// Placeholders are replaced with `str::replace`, never `format!`, so braces in
// profile text pass through untouched.

/// Rendered in place of every empty profile field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Resume generation prompt template.
/// Replace: {role_focus}, {name}, {headline}, {location}, {about},
///          {experience}, {education}, {skills}, {sections}, {guidelines}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional resume{role_focus} based on the following profile data:

Name: {name}
Current Role: {headline}
Location: {location}
About: {about}

Experience:
{experience}

Education:
{education}

Skills: {skills}

Please create a professional resume with the following sections:
{sections}

{guidelines}"#;

/// Formatting guidelines appended to every generation prompt.
pub const FORMATTING_GUIDELINES: &str = "Guidelines:
- Use action verbs and quantifiable achievements where possible
- Keep bullet points concise but impactful
- Tailor content to be ATS-friendly
- Make it professional and modern
- Focus on results and impact

Format the response as structured text with clear section headers.";

/// Section headers the model is asked for, in order, each with an optional hint.
pub const REQUESTED_SECTIONS: &[(&str, &str)] = &[
    ("PROFESSIONAL SUMMARY", "2-3 sentences highlighting key strengths"),
    ("CORE COMPETENCIES", "bullet points of key skills"),
    ("PROFESSIONAL EXPERIENCE", "detailed bullet points with achievements"),
    ("EDUCATION", ""),
    ("TECHNICAL SKILLS", ""),
];
