use std::fmt;

/// Version reported by the driver's `GL_VERSION` string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
    pub es: bool,
}

const ES_PREFIXES: [&str; 3] = ["OpenGL ES-CM ", "OpenGL ES-CL ", "OpenGL ES "];

impl DriverVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor, es: false }
    }

    /// Parses `"<major>.<minor>[.<release>] [vendor info]"`, optionally
    /// preceded by an embedded-profile prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let (rest, es) = match ES_PREFIXES.iter().find_map(|p| raw.strip_prefix(p)) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let number = rest.split_whitespace().next()?;
        let mut parts = number.split('.');
        let major = leading_digits(parts.next()?)?;
        let minor = parts.next().and_then(leading_digits).unwrap_or(0);
        Some(Self { major, minor, es })
    }

    pub fn at_least(self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

fn leading_digits(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.es {
            write!(f, "ES {}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}
