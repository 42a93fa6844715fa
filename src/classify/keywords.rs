/// License family names and abbreviations. Each entry is a case-insensitive
/// regex fragment matched anywhere in the tag.
pub const LICENSE_PATTERNS: &[&str] = &[
    "gpl",
    "lgpl",
    "agpl",
    "apache",
    "mit",
    "bsd",
    "mpl",
    "isc",
    "cc-",
    "epl",
    "cddl",
    "unlicense",
    "proprietary",
];

/// Programming language and platform names.
pub const LANGUAGE_PATTERNS: &[&str] = &[
    "python",
    "go",
    "golang",
    "rust",
    "java",
    "javascript",
    "typescript",
    r"c\+\+",
    "c#",
    r"\bc\b",
    "php",
    "ruby",
    "perl",
    "lua",
    "haskell",
    "kotlin",
    "scala",
    "shell",
    "powershell",
    "docker",
    r"node\.js",
    r"\.net",
    "groovy",
    "elixir",
    "erlang",
    "swift",
];

pub fn default_license_patterns() -> Vec<String> {
    LICENSE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

pub fn default_language_patterns() -> Vec<String> {
    LANGUAGE_PATTERNS.iter().map(|p| p.to_string()).collect()
}
