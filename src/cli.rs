//! `--fetch-only`: print one lookup and exit.

use std::io::{self, Write};

use crate::fetch::GraphqlClient;
use crate::server::{lookup_details, upstream_error_body};

/// Writes the endpoint body for `name` to `out` and the status line to `err`.
/// A failed lookup writes its report and error body to `err` instead.
/// Returns the process exit code.
pub async fn fetch_only<O, E>(
    client: &GraphqlClient,
    name: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<i32>
where
    O: Write,
    E: Write,
{
    match lookup_details(client, name).await {
        Ok(lookup) => {
            let status = lookup.status();
            let body = serde_json::to_string_pretty(&lookup.into_body())?;
            writeln!(out, "{body}")?;
            writeln!(err, "status: {}", status.as_u16())?;
            Ok(0)
        }
        Err(failure) => {
            writeln!(err, "{}", failure.report())?;
            writeln!(err, "{}", upstream_error_body(&failure))?;
            Ok(1)
        }
    }
}
