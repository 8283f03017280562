//! Flatten dataset file use case

use std::path::{Path, PathBuf};

use varflat_domain::{Dataset, ResolveSettings};

use super::resolve_dataset::{ResolveDataset, ResolveDatasetOutput};
use crate::error::ApplicationResult;
use crate::ports::DatasetRepository;

/// Where the flattened dataset goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlattenTarget {
    /// Overwrite the input file.
    #[default]
    Overwrite,
    /// Write to another file; its extension selects the format.
    File(PathBuf),
    /// Do not write; the caller uses the returned dataset.
    Discard,
}

/// Input for the flatten use case.
#[derive(Debug, Clone)]
pub struct FlattenDatasetFileInput {
    /// Dataset file to read.
    pub input: PathBuf,
    /// Where to write the result.
    pub target: FlattenTarget,
    /// Resolution settings.
    pub settings: ResolveSettings,
}

impl FlattenDatasetFileInput {
    /// Creates an input that overwrites `input` with default settings.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            target: FlattenTarget::default(),
            settings: ResolveSettings::default(),
        }
    }

    /// Sets the write target.
    #[must_use]
    pub fn with_target(mut self, target: FlattenTarget) -> Self {
        self.target = target;
        self
    }

    /// Sets the resolution settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ResolveSettings) -> Self {
        self.settings = settings;
        self
    }

    fn destination(&self) -> Option<&Path> {
        match &self.target {
            FlattenTarget::Overwrite => Some(&self.input),
            FlattenTarget::File(path) => Some(path),
            FlattenTarget::Discard => None,
        }
    }
}

/// Output of the flatten use case.
#[derive(Debug, Clone)]
pub struct FlattenDatasetFileOutput {
    /// The flattened dataset.
    pub dataset: Dataset,
    /// Per-record resolution details.
    pub report: ResolveDatasetOutput,
    /// The file written, if any.
    pub written_to: Option<PathBuf>,
}

/// Loads a dataset file, resolves every record and writes the result.
///
/// Nothing is written if resolution fails.
pub struct FlattenDatasetFile<R> {
    repository: R,
}

impl<R: DatasetRepository> FlattenDatasetFile<R> {
    /// Creates a new `FlattenDatasetFile` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the underlying repository.
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the dataset cannot be loaded, resolved or saved.
    pub async fn execute(
        &self,
        input: FlattenDatasetFileInput,
    ) -> ApplicationResult<FlattenDatasetFileOutput> {
        let mut dataset = self.repository.load(&input.input).await?;
        tracing::debug!(path = %input.input.display(), records = dataset.len(), "dataset loaded");

        let report = ResolveDataset::new(input.settings.clone()).execute(&mut dataset)?;

        let written_to = match input.destination() {
            Some(path) => {
                self.repository.save(path, &dataset).await?;
                tracing::debug!(path = %path.display(), "dataset written");
                Some(path.to_path_buf())
            }
            None => None,
        };

        Ok(FlattenDatasetFileOutput {
            dataset,
            report,
            written_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use varflat_domain::Record;

    use crate::error::ApplicationError;
    use crate::ports::DatasetError;

    struct MockRepository {
        files: Mutex<HashMap<PathBuf, Dataset>>,
    }

    impl MockRepository {
        fn new() -> Self {
            Self {
                files: Mutex::new(HashMap::new()),
            }
        }

        fn add(&self, path: &str, dataset: Dataset) {
            let mut files = self.files.lock().expect("Lock poisoned");
            files.insert(PathBuf::from(path), dataset);
        }

        fn get(&self, path: &str) -> Option<Dataset> {
            let files = self.files.lock().expect("Lock poisoned");
            files.get(Path::new(path)).cloned()
        }
    }

    #[async_trait]
    impl DatasetRepository for MockRepository {
        async fn load(&self, path: &Path) -> Result<Dataset, DatasetError> {
            let files = self.files.lock().expect("Lock poisoned");
            files
                .get(path)
                .cloned()
                .ok_or_else(|| DatasetError::NotFound(path.to_path_buf()))
        }

        async fn save(&self, path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
            let mut files = self.files.lock().expect("Lock poisoned");
            files.insert(path.to_path_buf(), dataset.clone());
            Ok(())
        }
    }

    fn books() -> Dataset {
        vec![
            Record::from([("isbn", "123"), ("name", "Clara")]),
            Record::from([("isbn", "456"), ("author", "$varbookref isbn == 123 !! name")]),
        ]
        .into()
    }

    #[tokio::test]
    async fn test_flatten_overwrites_input() {
        let repo = MockRepository::new();
        repo.add("/data/books.json", books());

        let use_case = FlattenDatasetFile::new(repo);
        let output = use_case
            .execute(FlattenDatasetFileInput::new("/data/books.json"))
            .await
            .expect("Should succeed");

        assert!(output.report.is_complete());
        assert_eq!(output.written_to, Some(PathBuf::from("/data/books.json")));
        let saved = use_case.repository().get("/data/books.json").expect("Should be saved");
        assert_eq!(saved.get(1).and_then(|r| r.get("author")), Some("Clara"));
    }

    #[tokio::test]
    async fn test_flatten_to_other_file_keeps_input() {
        let repo = MockRepository::new();
        repo.add("/data/books.json", books());

        let use_case = FlattenDatasetFile::new(repo);
        let input = FlattenDatasetFileInput::new("/data/books.json")
            .with_target(FlattenTarget::File(PathBuf::from("/out/books.yaml")));
        use_case.execute(input).await.expect("Should succeed");

        assert_eq!(use_case.repository().get("/data/books.json"), Some(books()));
        assert!(use_case.repository().get("/out/books.yaml").is_some());
    }

    #[tokio::test]
    async fn test_flatten_discard_writes_nothing() {
        let repo = MockRepository::new();
        repo.add("/data/books.json", books());

        let use_case = FlattenDatasetFile::new(repo);
        let input =
            FlattenDatasetFileInput::new("/data/books.json").with_target(FlattenTarget::Discard);
        let output = use_case.execute(input).await.expect("Should succeed");

        assert_eq!(output.written_to, None);
        assert_eq!(output.dataset.get(1).and_then(|r| r.get("author")), Some("Clara"));
        assert_eq!(use_case.repository().get("/data/books.json"), Some(books()));
    }

    #[tokio::test]
    async fn test_flatten_missing_file() {
        let repo = MockRepository::new();
        let use_case = FlattenDatasetFile::new(repo);

        let result = use_case
            .execute(FlattenDatasetFileInput::new("/data/none.json"))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Dataset(DatasetError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_flatten_strict_failure_writes_nothing() {
        let repo = MockRepository::new();
        let dataset: Dataset = vec![Record::from([("a", "${missing}")])].into();
        repo.add("/data/broken.json", dataset.clone());

        let use_case = FlattenDatasetFile::new(repo);
        let input = FlattenDatasetFileInput::new("/data/broken.json")
            .with_settings(ResolveSettings::new().with_fail_on_unresolved(true));
        let result = use_case.execute(input).await;

        assert!(matches!(result, Err(ApplicationError::Unresolved { record: 0, .. })));
        assert_eq!(use_case.repository().get("/data/broken.json"), Some(dataset));
    }
}
