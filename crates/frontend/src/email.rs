//! Transactional email templates.
//!
//! Static string generation: rendering stays here, delivery belongs to
//! the backend mail endpoint.

/// A rendered message ready for the mail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Sent right after a successful signup.
pub fn welcome(username: &str) -> EmailMessage {
    EmailMessage {
        subject: "Welcome to Ridgeline Chess".to_string(),
        html: format!(
            "<h1>Welcome, {username}!</h1>\
             <p>Your account is ready. Import your games, solve the daily \
             puzzle, and challenge the engine whenever you like.</p>\
             <p>See you on the board.</p>"
        ),
        text: format!(
            "Welcome, {username}!\n\n\
             Your account is ready. Import your games, solve the daily \
             puzzle, and challenge the engine whenever you like.\n\n\
             See you on the board."
        ),
    }
}

/// Address-verification message with a confirmation link.
pub fn verify_address(username: &str, link: &str) -> EmailMessage {
    EmailMessage {
        subject: "Verify your email address".to_string(),
        html: format!(
            "<p>Hi {username},</p>\
             <p>Confirm your email address to finish setting up your \
             account:</p>\
             <p><a href=\"{link}\">Verify email</a></p>\
             <p>If you did not create this account you can ignore this \
             message.</p>"
        ),
        text: format!(
            "Hi {username},\n\n\
             Confirm your email address to finish setting up your account:\n\n\
             {link}\n\n\
             If you did not create this account you can ignore this message."
        ),
    }
}

/// Password-reset message with a reset link.
pub fn reset_password(username: &str, link: &str) -> EmailMessage {
    EmailMessage {
        subject: "Reset your password".to_string(),
        html: format!(
            "<p>Hi {username},</p>\
             <p>Someone requested a password reset for your account. The \
             link below is valid for one hour:</p>\
             <p><a href=\"{link}\">Reset password</a></p>\
             <p>If this wasn't you, your password is still safe and no \
             action is needed.</p>"
        ),
        text: format!(
            "Hi {username},\n\n\
             Someone requested a password reset for your account. The link \
             below is valid for one hour:\n\n\
             {link}\n\n\
             If this wasn't you, your password is still safe and no action \
             is needed."
        ),
    }
}
