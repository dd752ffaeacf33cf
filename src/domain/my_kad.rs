/// A MyKad (Malaysian national ID) number, normalized to its 12 digits.
///
/// Accepts both `YYMMDDPBNNNG` and the printed `YYMMDD-PB-NNNG` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MyKad(String);

const MY_KAD_DIGITS: usize = 12;

impl MyKad {
    pub fn parse(s: &str) -> Result<MyKad, String> {
        let digits: String = s.trim().chars().filter(|c| *c != '-').collect();
        if digits.len() != MY_KAD_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("{} is not a valid MyKad number.", s));
        }
        Ok(Self(digits))
    }
}

impl AsRef<str> for MyKad {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MyKad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", &self.0[..6], &self.0[6..8], &self.0[8..])
    }
}
