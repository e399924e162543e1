/// Sign-up input after presence checks. Every field is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpFields {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}
