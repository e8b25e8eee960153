use super::PathNumber;

/// Result of the demo download endpoint, keyed by the coerced path id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadOutcome {
    Archive,
    Rejected(DownloadRejection),
}

/// Terminal failures of the demo download endpoint.
///
/// Malformed ids (NaN) and well-formed ids without a mapping both land in
/// `BadRequest`; callers cannot tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadRejection {
    Unauthorized,
    Conflict,
    BadRequest,
}

impl DownloadOutcome {
    /// File name of the archive served for [`DownloadOutcome::Archive`].
    pub const ARCHIVE_FILE_NAME: &'static str = "assets_demo.zip";

    pub fn for_id(id: PathNumber) -> Self {
        if id.loosely_equals(1) {
            Self::Archive
        } else if id.loosely_equals(2) {
            Self::Rejected(DownloadRejection::Unauthorized)
        } else if id.loosely_equals(3) {
            Self::Rejected(DownloadRejection::Conflict)
        } else {
            Self::Rejected(DownloadRejection::BadRequest)
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Archive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Rejected(rejection) => rejection.as_str(),
        }
    }
}

impl DownloadRejection {
    /// Message literal surfaced to the caller.
    pub fn message(self) -> &'static str {
        match self {
            Self::Unauthorized => "UnauthorizedException",
            Self::Conflict => "ConflictException",
            Self::BadRequest => "BadRequestException",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Conflict => "conflict",
            Self::BadRequest => "bad_request",
        }
    }
}

/// Observability hook invoked once per download request.
pub trait DownloadObserver: Send + Sync {
    fn download_requested(&self, raw_id: &str, id: PathNumber, outcome: DownloadOutcome);
}
