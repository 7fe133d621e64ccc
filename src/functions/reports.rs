use std::io::Read;

use amazon_ads_types::ReportRequest;
use flate2::read::GzDecoder;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use ureq::http::Method;

use super::{ads_request, ads_request_text};
use crate::{APIResult, AdsContext, ReportError};

pub(crate) const REPORTS_PATH: &str = "/reporting/reports";
pub(crate) const CREATE_REPORT_MEDIA_TYPE: &str = "application/vnd.createasyncreportrequest.v3+json";
pub(crate) const REPORT_STATUS_MEDIA_TYPE: &str = "application/vnd.advertisingReport+json";

const COMPLETED: &str = "COMPLETED";

/// Server side view of a report job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    #[serde(default)]
    pub report_id: Option<String>,
    pub status: String,
    /// Pre-signed download location, present once the report completed.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl ReportStatus {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED
    }
}

/// Submits a report job and returns the id the server assigned to it.
///
/// The job is always a Sponsored Products summary over the whole date
/// range, delivered as gzip compressed JSON.
pub fn create_report(ctx: &AdsContext, request: &ReportRequest) -> APIResult<String> {
    let response: Value = ads_request(
        ctx,
        Method::POST,
        REPORTS_PATH,
        Some(&request.to_payload()),
        CREATE_REPORT_MEDIA_TYPE,
    )?;

    match response.get("reportId").and_then(Value::as_str) {
        Some(report_id) => {
            #[cfg(feature = "logging")]
            log::info!(
                "Submitted {} report {report_id} for {} to {}",
                request.report_type_id,
                request.start_date,
                request.end_date
            );
            Ok(report_id.to_string())
        }
        None => Err(ReportError::MissingReportId {
            body: response.to_string(),
        }
        .into()),
    }
}

/// Waits for a report to complete and returns its decoded rows.
///
/// The status is polled with the context's poll interval until it reads
/// `COMPLETED`; every other status, failures included, means "poll again".
/// Without `max_polls` in the context's settings this never gives up.
///
/// The finished artifact is fetched from the returned URL without
/// credentials, then gunzipped and parsed as JSON.
pub fn get_report<T: DeserializeOwned>(ctx: &AdsContext, report_id: &str) -> APIResult<T> {
    let path = format!("{REPORTS_PATH}/{report_id}");
    let mut polls = 0;

    loop {
        let status = ads_request_text(ctx, Method::GET, &path, None::<&()>, REPORT_STATUS_MEDIA_TYPE)
            .map_err(|source| ReportError::Poll {
                report_id: report_id.to_string(),
                source,
            })?;
        polls += 1;

        let status: ReportStatus =
            serde_json::from_str(&status).map_err(|e| ReportError::MalformedStatus {
                report_id: report_id.to_string(),
                reason: e.to_string(),
            })?;

        if status.is_completed() {
            let Some(url) = status.url else {
                return Err(ReportError::MalformedStatus {
                    report_id: report_id.to_string(),
                    reason: "completed without a download url".to_string(),
                }
                .into());
            };
            return download_report(ctx, report_id, &url);
        }

        if ctx.settings.max_polls.is_some_and(|limit| polls >= limit) {
            return Err(ReportError::PollLimit {
                report_id: report_id.to_string(),
                polls,
            }
            .into());
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "Report {report_id} is {}, polling again in {:?}",
            status.status,
            ctx.settings.poll_interval
        );
        std::thread::sleep(ctx.settings.poll_interval);
    }
}

/// Submits `request` and waits for its rows.
pub fn run_report<T: DeserializeOwned>(ctx: &AdsContext, request: &ReportRequest) -> APIResult<T> {
    let report_id = create_report(ctx, request)?;
    get_report(ctx, &report_id)
}

fn download_report<T: DeserializeOwned>(ctx: &AdsContext, report_id: &str, url: &str) -> APIResult<T> {
    let download_error = |source| ReportError::Download {
        report_id: report_id.to_string(),
        source,
    };

    // The download URL is pre-signed; it takes no Authorization header
    let response = ctx.agent.get(url).call().map_err(download_error)?;
    let status = response.status();
    let mut body = response.into_body();

    if !status.is_success() {
        return Err(ReportError::DownloadStatus {
            report_id: report_id.to_string(),
            status: status.as_u16(),
            body: body.read_to_string().unwrap_or_default(),
        }
        .into());
    }

    let compressed = body
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(download_error)?;

    let json = gunzip(&compressed).map_err(|source| ReportError::Decompress {
        report_id: report_id.to_string(),
        source,
    })?;

    let report = serde_json::from_slice(&json).map_err(|source| ReportError::Decode {
        report_id: report_id.to_string(),
        source,
    })?;

    #[cfg(feature = "logging")]
    log::info!(
        "Downloaded report {report_id} ({} bytes compressed, {} bytes of JSON)",
        compressed.len(),
        json.len()
    );

    Ok(report)
}

fn gunzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::*;

    #[test]
    fn gunzip_round_trips_encoder_output() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"[{"clicks":3}]"#).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(gunzip(&compressed).unwrap(), br#"[{"clicks":3}]"#);
    }

    #[test]
    fn gunzip_rejects_plain_json() {
        assert!(gunzip(br#"[{"clicks":3}]"#).is_err());
    }

    #[test]
    fn status_payloads() {
        let pending: ReportStatus =
            serde_json::from_str(r#"{"reportId":"r-1","status":"PENDING"}"#).unwrap();
        assert!(!pending.is_completed());
        assert_eq!(pending.url, None);

        let done: ReportStatus = serde_json::from_str(
            r#"{"reportId":"r-1","status":"COMPLETED","url":"https://example.com/r-1.json.gz"}"#,
        )
        .unwrap();
        assert!(done.is_completed());
    }
}
