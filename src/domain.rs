mod linkedin_url;
mod new_signup;
mod signup_email;

pub use linkedin_url::LinkedinUrl;
pub use new_signup::{NewSignup, SignupForm, ValidationErrors};
pub use signup_email::SignupEmail;
