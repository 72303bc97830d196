use fake::Fake;
use fake::faker::internet::en::{Password, Username};
use fake::faker::name::en::{FirstName, LastName};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::requests::v1::user::RegisterUserRequest;

const PASSWORD_LENGTH: usize = 15;

/// Random but structurally valid user data
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator, same seed gives the same sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    /// Name-derived handle restricted to `[A-Za-z0-9._]`
    pub fn username(&mut self) -> String {
        let username: String = Username().fake_with_rng(&mut self.rng);

        username
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_'))
            .collect()
    }

    pub fn password(&mut self) -> String {
        Password(PASSWORD_LENGTH..PASSWORD_LENGTH + 1).fake_with_rng(&mut self.rng)
    }

    /// Payload accepted by `POST /users`
    pub fn registration(&mut self) -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: self.first_name(),
            last_name: self.last_name(),
            username: self.username(),
            password: self.password(),
        }
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}
