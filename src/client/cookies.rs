use awc::cookie::Cookie;
use awc::cookie::time::OffsetDateTime;

/// Cookies set by the service, replayed on later requests
#[derive(Clone, Debug, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie<'static>>,
}

impl CookieJar {
    /// Record a cookie from a response
    ///
    /// A cookie with the same name is replaced. An expired cookie (`Max-Age`
    /// of zero or less, or an `Expires` date in the past) removes it instead.
    pub fn store(&mut self, cookie: Cookie<'static>) {
        self.cookies.retain(|existing| existing.name() != cookie.name());

        if !is_expired(&cookie) {
            self.cookies.push(cookie);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies.iter().find(|cookie| cookie.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie<'static>> {
        self.cookies.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }
}

fn is_expired(cookie: &Cookie<'_>) -> bool {
    let max_age_spent = cookie
        .max_age()
        .is_some_and(|max_age| max_age.is_zero() || max_age.is_negative());
    let expires_passed = cookie
        .expires_datetime()
        .is_some_and(|expires| expires <= OffsetDateTime::now_utc());

    max_age_spent || expires_passed
}
