use crate::error::ReleaseBumpError;

/// Represents a semantic version with major, minor, and patch components.
///
/// Immutable value type: bumping produces a new instance, nothing mutates
/// in place. The canonical textual form is `v<major>.<minor>.<patch>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Represents which version component a release bump increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version from a release tag string.
    ///
    /// Accepts tags of the form `v<digits>.<digits>.<digits>`. The dots in
    /// the pattern are intentionally unescaped, so any single character is
    /// accepted between the components.
    ///
    /// # Arguments
    /// * `input` - Tag string to parse (e.g., "v1.2.3")
    ///
    /// # Returns
    /// * `Some(Version)` - Successfully parsed version
    /// * `None` - If the tag doesn't match the pattern
    ///
    /// # Example
    /// ```
    /// use release_bump::version::Version;
    ///
    /// assert_eq!(Version::parse("v1.2.3"), Some(Version::new(1, 2, 3)));
    /// assert_eq!(Version::parse("1.2.3"), None); // Missing 'v' prefix
    /// assert_eq!(Version::parse("v1.2"), None); // Too few components
    /// ```
    pub fn parse(input: &str) -> Option<Version> {
        // Dots left unescaped: any separator character matches.
        let re = regex::Regex::new(r"^v(\d+).(\d+).(\d+)$").ok()?;
        let captures = re.captures(input)?;

        let major = captures[1].parse::<u64>().ok()?;
        let minor = captures[2].parse::<u64>().ok()?;
        let patch = captures[3].parse::<u64>().ok()?;

        Some(Version::new(major, minor, patch))
    }

    /// Bumps the version according to the specified bump kind.
    ///
    /// Increments the selected component and resets lower components to 0:
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    ///
    /// Pure: returns a new Version, the receiver is unchanged.
    ///
    /// # Example
    /// ```
    /// use release_bump::version::{BumpKind, Version};
    ///
    /// let v = Version::new(1, 2, 3);
    /// assert_eq!(v.bump(BumpKind::Major), Version::new(2, 0, 0));
    /// assert_eq!(v.bump(BumpKind::Minor), Version::new(1, 3, 0));
    /// assert_eq!(v.bump(BumpKind::Patch), Version::new(1, 2, 4));
    /// ```
    pub fn bump(self, kind: BumpKind) -> Version {
        match kind {
            BumpKind::Major => Version::new(self.major + 1, 0, 0),
            BumpKind::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }

    /// Returns true if any component, checked from major to patch, is
    /// greater than the other version's.
    ///
    /// The component checks run independently: a larger minor wins even
    /// when major is smaller, so `v1.5.0.greater_than(v2.0.0)` is true.
    /// This is not a total order (neither antisymmetric nor transitive).
    /// Callers that need a real ordering must not use this.
    pub fn greater_than(&self, other: &Version) -> bool {
        if self.major > other.major {
            return true;
        }
        if self.minor > other.minor {
            return true;
        }
        self.patch > other.patch
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl BumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl std::str::FromStr for BumpKind {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(ReleaseBumpError::config(format!(
                "expected version_type to be one of \"major\", \"minor\", \"patch\", got \"{}\"",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
