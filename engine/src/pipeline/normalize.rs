// Player-name normalization. Both sides of the join must produce the same key
// for the same player.
use shared::models::PlayerSalaryRecord;

/// Removes every occurrence of a scraping artifact (e.g. `"</strong"`) from a stats name.
pub fn clean_player_name(raw: &str, artifact: &str) -> String {
    if artifact.is_empty() {
        return raw.to_string();
    }
    raw.replace(artifact, "")
}

/// Join key of a salary row: first name, one space, last name.
pub fn salary_join_key(record: &PlayerSalaryRecord) -> String {
    record.full_name()
}
