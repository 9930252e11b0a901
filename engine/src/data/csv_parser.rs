use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use shared::models::{
    unified_columns, AttendanceRecord, League, LeagueRevenue, PlayerSalaryRecord,
    PlayerStatsRecord, StatLine, UnifiedPlayerRecord, IDENTITY_COLUMNS, STAT_COLUMNS, STAT_COUNT,
};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

// Numeric cell helpers. Blank cells are only acceptable where a value may be absent.
pub mod cells {
    use crate::error::EngineError;

    pub fn parse_number(raw: &str, column: &str, line: usize) -> Result<f64, EngineError> {
        raw.trim().parse::<f64>().map_err(|e| {
            EngineError::CsvDataFormatError(format!(
                "Error parsing '{}' value '{}' at line {}: {}",
                column, raw, line, e
            ))
        })
    }

    pub fn parse_optional_number(raw: &str, column: &str, line: usize) -> Result<Option<f64>, EngineError> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            parse_number(raw, column, line).map(Some)
        }
    }

    /// Shortest representation that reads back to the same value; `1000000.0` is written as `1000000`.
    pub fn format_number(value: f64) -> String {
        format!("{}", value)
    }

    pub fn format_optional_number(value: Option<f64>) -> String {
        value.map(format_number).unwrap_or_default()
    }

}

/// Header positions of one source file, so rows can be read by column name.
struct HeaderIndex {
    headers: StringRecord,
    source_name: String,
}

impl HeaderIndex {
    fn new(headers: StringRecord, source_name: &str) -> Self {
        HeaderIndex {
            headers,
            source_name: source_name.to_string(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn require(&self, name: &str) -> Result<usize, EngineError> {
        self.position(name)
            .ok_or_else(|| EngineError::missing_column(name, &self.source_name))
    }

    fn require_all(&self, names: &[&str]) -> Result<Vec<usize>, EngineError> {
        names.iter().map(|name| self.require(name)).collect()
    }
}

fn get_field<'a>(record: &'a StringRecord, pos: usize) -> &'a str {
    record.get(pos).unwrap_or("")
}

fn open_source(path: &Path) -> Result<BufReader<File>, EngineError> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to open '{}': {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

fn reader_for<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(input)
}

fn read_stat_line(
    record: &StringRecord,
    stat_positions: &[usize],
    line: usize,
) -> Result<StatLine, EngineError> {
    let mut stats: StatLine = [None; STAT_COUNT];
    for (slot, (&pos, column)) in stats.iter_mut().zip(stat_positions.iter().zip(STAT_COLUMNS)) {
        *slot = cells::parse_optional_number(get_field(record, pos), column, line)?;
    }
    Ok(stats)
}

pub struct PlayerCsvParser;

impl PlayerCsvParser {
    // Header must contain: first_name,last_name,salary (other identifier columns are ignored)
    pub fn load_salaries(file_path: &Path) -> Result<Vec<PlayerSalaryRecord>, EngineError> {
        let mut rdr = reader_for(open_source(file_path)?);
        let index = HeaderIndex::new(rdr.headers()?.clone(), &file_path.display().to_string());
        let first_pos = index.require("first_name")?;
        let last_pos = index.require("last_name")?;
        let salary_pos = index.require("salary")?;

        let mut salaries = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            salaries.push(PlayerSalaryRecord {
                first_name: get_field(&record, first_pos).to_string(),
                last_name: get_field(&record, last_pos).to_string(),
                salary: cells::parse_number(get_field(&record, salary_pos), "salary", line)?,
            });
        }
        tracing::debug!(path = %file_path.display(), rows = salaries.len(), "Loaded salary table");
        Ok(salaries)
    }

    // Header must contain: Player,<team_column>,Pos and every per-game stat column
    pub fn load_stats(file_path: &Path, team_column: &str) -> Result<Vec<PlayerStatsRecord>, EngineError> {
        let mut rdr = reader_for(open_source(file_path)?);
        let index = HeaderIndex::new(rdr.headers()?.clone(), &file_path.display().to_string());
        let player_pos = index.require("Player")?;
        let team_pos = index.require(team_column)?;
        let pos_pos = index.require("Pos")?;
        let stat_positions = index.require_all(&STAT_COLUMNS)?;

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            rows.push(PlayerStatsRecord {
                player: get_field(&record, player_pos).to_string(),
                team: get_field(&record, team_pos).to_string(),
                pos: get_field(&record, pos_pos).to_string(),
                stats: read_stat_line(&record, &stat_positions, line)?,
            });
        }
        tracing::debug!(path = %file_path.display(), rows = rows.len(), "Loaded stats table");
        Ok(rows)
    }

    /// Reads a combined table written by `write_unified`.
    pub fn load_unified(file_path: &Path) -> Result<Vec<UnifiedPlayerRecord>, EngineError> {
        let mut rdr = reader_for(open_source(file_path)?);
        let index = HeaderIndex::new(rdr.headers()?.clone(), &file_path.display().to_string());
        let identity = index.require_all(&IDENTITY_COLUMNS)?;
        let stat_positions = index.require_all(&STAT_COLUMNS)?;

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            let league_str = get_field(&record, identity[1]);
            let league = League::from_label(league_str).ok_or_else(|| {
                EngineError::CsvDataFormatError(format!("Unknown league '{}' at line {}", league_str, line))
            })?;
            records.push(UnifiedPlayerRecord {
                player: get_field(&record, identity[0]).to_string(),
                league,
                team: get_field(&record, identity[2]).to_string(),
                pos: get_field(&record, identity[3]).to_string(),
                salary: cells::parse_number(get_field(&record, identity[4]), "salary", line)?,
                stats: read_stat_line(&record, &stat_positions, line)?,
            });
        }
        Ok(records)
    }

    /// Writes the combined table with a header row and no index column.
    ///
    /// Rows go to a sibling `.tmp` file that is renamed over `file_path` once
    /// complete, so a failure never leaves a partial table behind.
    pub fn write_unified(file_path: &Path, records: &[UnifiedPlayerRecord]) -> Result<(), EngineError> {
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = temp_path_for(file_path);

        let written = Self::write_rows(&tmp_path, records);
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        fs::rename(&tmp_path, file_path)?;
        tracing::debug!(path = %file_path.display(), rows = records.len(), "Wrote combined table");
        Ok(())
    }

    fn write_rows(path: &Path, records: &[UnifiedPlayerRecord]) -> Result<(), EngineError> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
        wtr.write_record(unified_columns())?;
        for record in records {
            let mut row = vec![
                record.player.clone(),
                record.league.label().to_string(),
                record.team.clone(),
                record.pos.clone(),
                cells::format_number(record.salary),
            ];
            row.extend(record.stats.iter().map(|v| cells::format_optional_number(*v)));
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    // Header must contain: total_year_revenue,revenue_share_ratio and optionally league.
    // Without a league column rows are WNBA then NBA.
    pub fn load_league_revenue(file_path: &Path) -> Result<Vec<LeagueRevenue>, EngineError> {
        const POSITIONAL: [League; 2] = [League::Wnba, League::Nba];

        let mut rdr = reader_for(open_source(file_path)?);
        let index = HeaderIndex::new(rdr.headers()?.clone(), &file_path.display().to_string());
        let revenue_pos = index.require("total_year_revenue")?;
        let ratio_pos = index.require("revenue_share_ratio")?;
        let league_pos = index.position("league").or_else(|| index.position("League"));

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            let league = match league_pos {
                Some(pos) => {
                    let label = get_field(&record, pos);
                    League::from_label(label).ok_or_else(|| {
                        EngineError::CsvDataFormatError(format!("Unknown league '{}' at line {}", label, line))
                    })?
                }
                None => *POSITIONAL.get(idx).ok_or_else(|| {
                    EngineError::CsvDataFormatError(format!(
                        "Revenue table without a league column has more than {} rows (line {})",
                        POSITIONAL.len(),
                        line
                    ))
                })?,
            };
            rows.push(LeagueRevenue {
                league,
                total_year_revenue: cells::parse_number(get_field(&record, revenue_pos), "total_year_revenue", line)?,
                revenue_share_ratio: cells::parse_number(get_field(&record, ratio_pos), "revenue_share_ratio", line)?,
            });
        }
        Ok(rows)
    }

    // Header must contain: season,team,opponent,attendance
    pub fn load_attendance(file_path: &Path) -> Result<Vec<AttendanceRecord>, EngineError> {
        let mut rdr = reader_for(open_source(file_path)?);
        let index = HeaderIndex::new(rdr.headers()?.clone(), &file_path.display().to_string());
        index.require_all(&["season", "team", "opponent", "attendance"])?;

        let mut rows = Vec::new();
        for (idx, result) in rdr.deserialize::<AttendanceRecord>().enumerate() {
            let row = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error reading attendance at line {}: {}", idx + 2, e))
            })?;
            rows.push(row);
        }
        Ok(rows)
    }
}

fn temp_path_for(file_path: &Path) -> PathBuf {
    let mut name = file_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    file_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn stats_header(team_column: &str) -> String {
        format!("Rk,Player,{},Pos,{}", team_column, STAT_COLUMNS.join(","))
    }

    fn stats_row(player: &str, team: &str, pos: &str, pts: &str) -> String {
        // 22 stats before PTS; leave 3P% blank
        let mut values: Vec<String> = (1..=22).map(|v| v.to_string()).collect();
        values[8] = String::new();
        values.push(pts.to_string());
        format!("1,{},{},{},{}", player, team, pos, values.join(","))
    }

    #[test]
    fn test_load_salaries_valid_data() {
        let tmp_file = create_test_csv(
            "\
player_id,first_name,last_name,salary,team_id
17,Diana,Taurasi,117500,PHO
22,Sue,Bird,115500,SEA",
        );
        let salaries = PlayerCsvParser::load_salaries(tmp_file.path()).unwrap();
        assert_eq!(salaries.len(), 2);
        assert_eq!(salaries[0].full_name(), "Diana Taurasi");
        assert_eq!(salaries[1].salary, 115500.0);
    }

    #[test]
    fn test_load_salaries_missing_column_names_column_and_source() {
        let tmp_file = create_test_csv("first_name,last_name,pay\nSue,Bird,115500");
        let err = PlayerCsvParser::load_salaries(tmp_file.path()).unwrap_err();
        match &err {
            EngineError::MissingColumn { column, source_name } => {
                assert_eq!(column, "salary");
                assert_eq!(source_name, &tmp_file.path().display().to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_salaries_invalid_number() {
        let tmp_file = create_test_csv("first_name,last_name,salary\nSue,Bird,lots");
        let err = PlayerCsvParser::load_salaries(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Error parsing 'salary'"));
    }

    #[test]
    fn test_load_salaries_missing_file() {
        let err = PlayerCsvParser::load_salaries(Path::new("/nonexistent/salaries.csv")).unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/salaries.csv"));
    }

    #[test]
    fn test_load_stats_with_league_team_column() {
        let content = format!(
            "{}\n{}",
            stats_header("Tm"),
            stats_row("LeBron James", "LAL", "SF", "27.4")
        );
        let tmp_file = create_test_csv(&content);
        let rows = PlayerCsvParser::load_stats(tmp_file.path(), "Tm").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team, "LAL");
        assert_eq!(rows[0].stats[0], Some(1.0));
        assert_eq!(rows[0].stats[8], None);
        assert_eq!(rows[0].stats[22], Some(27.4));

        let err = PlayerCsvParser::load_stats(tmp_file.path(), "Team").unwrap_err();
        assert!(err.to_string().contains("Missing column 'Team'"));
    }

    #[test]
    fn test_load_stats_missing_stat_column() {
        let header = stats_header("Team").replace(",PTS", "");
        let tmp_file = create_test_csv(&header);
        let err = PlayerCsvParser::load_stats(tmp_file.path(), "Team").unwrap_err();
        assert!(err.to_string().contains("Missing column 'PTS'"));
    }

    #[test]
    fn test_write_then_load_unified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("combined.csv");
        let mut stats: StatLine = [Some(2.5); STAT_COUNT];
        stats[5] = None;
        let records = vec![
            UnifiedPlayerRecord {
                player: "Stephen Curry".to_string(),
                league: League::Nba,
                team: "GSW".to_string(),
                pos: "PG".to_string(),
                salary: 37_457_154.0,
                stats,
            },
            UnifiedPlayerRecord {
                player: "Elena Delle Donne".to_string(),
                league: League::Wnba,
                team: "WAS".to_string(),
                pos: "F".to_string(),
                salary: 115_000.0,
                stats: [Some(0.1); STAT_COUNT],
            },
        ];
        PlayerCsvParser::write_unified(&path, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, unified_columns().join(","));
        assert!(!temp_path_for(&path).exists());

        let loaded = PlayerCsvParser::load_unified(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_write_unified_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined.csv");
        fs::write(&path, "stale contents\nfrom an older run\n").unwrap();
        PlayerCsvParser::write_unified(&path, &[]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), unified_columns().join(","));
    }

    #[test]
    fn test_load_unified_unknown_league() {
        let mut row = vec!["Someone", "ABA", "X", "C", "1"];
        row.extend(std::iter::repeat("1").take(STAT_COLUMNS.len()));
        let content = format!("{}\n{}", unified_columns().join(","), row.join(","));
        let tmp_file = create_test_csv(&content);
        let err = PlayerCsvParser::load_unified(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Unknown league 'ABA' at line 2"));
    }

    #[test]
    fn test_load_league_revenue_positional() {
        let tmp_file = create_test_csv(
            "\
total_year_revenue,revenue_share_ratio
60000000,0.2
8760000000,0.5",
        );
        let rows = PlayerCsvParser::load_league_revenue(tmp_file.path()).unwrap();
        assert_eq!(rows[0].league, League::Wnba);
        assert_eq!(rows[1].league, League::Nba);
        assert_eq!(rows[1].total_year_revenue, 8_760_000_000.0);
    }

    #[test]
    fn test_load_league_revenue_named_and_overflowing() {
        let named = create_test_csv("league,total_year_revenue,revenue_share_ratio\nNBA,8760000000,0.5");
        let rows = PlayerCsvParser::load_league_revenue(named.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].league, League::Nba);

        let too_many = create_test_csv("total_year_revenue,revenue_share_ratio\n1,0.1\n2,0.2\n3,0.3");
        assert!(PlayerCsvParser::load_league_revenue(too_many.path()).is_err());
    }

    #[test]
    fn test_load_attendance() {
        let tmp_file = create_test_csv(
            "\
season,date,team,opponent,attendance
2019,2019-05-24,Seattle Storm,Phoenix Mercury,9000
2018,2018-06-01,Atlanta Dream,Chicago Sky,4100",
        );
        let rows = PlayerCsvParser::load_attendance(tmp_file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "Seattle Storm");
        assert_eq!(rows[0].attendance, 9000);
        assert_eq!(rows[1].season, 2018);
    }

    #[test]
    fn test_load_attendance_missing_column() {
        let tmp_file = create_test_csv("season,team,attendance\n2019,Seattle Storm,9000");
        let err = PlayerCsvParser::load_attendance(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing column 'opponent'"));
    }
}
