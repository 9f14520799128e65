use rand::Rng;

/// Game identifiers are 128-bit random tokens. Uniqueness across active
/// games is enforced at insertion time by the store.
pub fn generate_game_id() -> String {
    let token: u128 = rand::rng().random();
    format!("{:032x}", token)
}
