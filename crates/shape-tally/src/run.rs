use tracing::warn;

use crate::config::TallyConfig;
use crate::error::StreamError;
use crate::session::{Session, Step, Tally};

/// Feeds every record through a fresh session and collects the tallies.
///
/// Stops at the first failing record. Shapes left without a closing
/// directive are dropped with a warning.
pub fn run<I, R, S>(records: I, config: TallyConfig) -> Result<Vec<Tally>, StreamError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut session = Session::new(config);
    let mut tallies = Vec::new();

    for (index, fields) in records.into_iter().enumerate() {
        match session.feed(fields.as_ref()) {
            Ok(Step::Tallied(tally)) => tallies.push(tally),
            Ok(Step::Stored(_) | Step::Ignored(_)) => {}
            Err(error) => {
                return Err(StreamError {
                    record: index + 1,
                    error,
                });
            }
        }
    }

    if !session.is_empty() {
        warn!(
            pending = session.len(),
            "input ended with shapes that no directive measured"
        );
    }
    Ok(tallies)
}
