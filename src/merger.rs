//! Manifest merger
//!
//! Drives a single merge run: collect the directory buckets, then stream every
//! non-null document into the output file in directory, file, document order.

use crate::collector::{Collector, CollectorConfig, DirectoryBuckets};
use crate::document::{dropped_core_tags, parse_non_null};
use crate::error::{DocumentError, MergeError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Written between two consecutive documents.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Output file used when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "manifest.yaml";

/// Resolve the output path from raw user input. Blank input means the default.
pub fn resolve_output_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PathBuf::from(DEFAULT_OUTPUT_FILE)
    } else {
        PathBuf::from(trimmed)
    }
}

/// Inputs for one merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub follow_symlinks: bool,
}

impl MergeOptions {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            follow_symlinks: false,
        }
    }
}

/// A source file that contributed nothing because it could not be read or parsed
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub documents_written: usize,
    pub skipped: bool,
    /// Core tags such as `!!binary` whose values were written untagged
    pub dropped_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    pub path: String,
    pub files: Vec<FileReport>,
}

/// Summary of a completed merge run
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Absolute path of the written file
    pub output_path: PathBuf,
    pub directories: Vec<DirectoryReport>,
    pub documents_written: usize,
    pub skipped: Vec<SkippedFile>,
}

impl MergeReport {
    pub fn files_read(&self) -> usize {
        self.directories.iter().map(|d| d.files.len()).sum()
    }
}

/// Writes documents as one YAML stream, separating consecutive documents.
///
/// The separator goes in front of every document but the first, which leaves
/// the last document written without a trailing separator no matter where
/// it came from.
pub struct DocumentSink<W: Write> {
    writer: W,
    path: PathBuf,
    written: usize,
}

impl<W: Write> DocumentSink<W> {
    /// `path` names the destination in error messages.
    pub fn new(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: path.into(),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one already rendered document.
    pub fn write_document(&mut self, yaml: &str) -> Result<(), MergeError> {
        if self.written > 0 {
            self.write_raw(DOCUMENT_SEPARATOR)?;
        }
        self.write_raw(yaml)?;
        self.written += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, MergeError> {
        self.writer.flush().map_err(|source| MergeError::OutputWrite {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.writer)
    }

    fn write_raw(&mut self, text: &str) -> Result<(), MergeError> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| MergeError::OutputWrite {
                path: self.path.clone(),
                source,
            })
    }
}

/// A source file with every non-null document already rendered
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub documents: Vec<String>,
    pub dropped_tags: Vec<String>,
}

/// Read, parse and render one source file.
///
/// Nothing is returned unless every document renders, so a file is either
/// written whole or skipped whole.
pub fn load_file(path: &Path) -> Result<LoadedFile, DocumentError> {
    let source = std::fs::read_to_string(path)?;
    let documents = parse_non_null(&source)?
        .iter()
        .map(|doc| doc.to_yaml().map_err(DocumentError::Serialize))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LoadedFile {
        documents,
        dropped_tags: dropped_core_tags(&source),
    })
}

/// Merge runner
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Run the merge and write the output file.
    ///
    /// Collection happens before the output is opened, so a bad root leaves any
    /// existing output untouched.
    pub fn run(&self) -> Result<MergeReport, MergeError> {
        let collector = Collector::with_config(
            &self.options.root,
            CollectorConfig {
                follow_symlinks: self.options.follow_symlinks,
            },
        );
        let buckets = collector.collect()?;

        info!(count = buckets.len(), "Found directories with YAML files");
        for dir in buckets.keys() {
            info!("- {}", dir);
        }

        let output = &self.options.output;
        let file = File::create(output).map_err(|source| MergeError::OutputOpen {
            path: output.clone(),
            source,
        })?;
        let mut sink = DocumentSink::new(BufWriter::new(file), output);
        let (directories, skipped) = self.merge_buckets(&buckets, &mut sink)?;
        let documents_written = sink.written();
        drop(sink.finish()?);

        let output_path = absolute_path(output);
        info!(
            documents = documents_written,
            skipped = skipped.len(),
            "Merged manifest file created at: {}",
            output_path.display()
        );

        Ok(MergeReport {
            output_path,
            directories,
            documents_written,
            skipped,
        })
    }

    /// Stream every bucket into the sink.
    pub fn merge_buckets<W: Write>(
        &self,
        buckets: &DirectoryBuckets,
        sink: &mut DocumentSink<W>,
    ) -> Result<(Vec<DirectoryReport>, Vec<SkippedFile>), MergeError> {
        let mut directories = Vec::with_capacity(buckets.len());
        let mut skipped = Vec::new();

        // BTreeMap iteration is the ascending ordinal order of the relative paths
        for (dir_name, files) in buckets {
            info!(directory = %dir_name, "Processing directory");
            let mut file_reports = Vec::with_capacity(files.len());

            for file_name in files {
                let path = self.options.root.join(dir_name).join(file_name);
                info!(file = %file_name, "Reading file");

                let loaded = match load_file(&path) {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        error!("Error reading {}: {}", path.display(), e);
                        skipped.push(SkippedFile {
                            path,
                            reason: e.to_string(),
                        });
                        file_reports.push(FileReport {
                            name: file_name.clone(),
                            documents_written: 0,
                            skipped: true,
                            dropped_tags: Vec::new(),
                        });
                        continue;
                    }
                };

                if !loaded.dropped_tags.is_empty() {
                    warn!(
                        "Tags {} in {} are not kept; values written untagged",
                        loaded.dropped_tags.join(", "),
                        path.display()
                    );
                }
                for document in &loaded.documents {
                    sink.write_document(document)?;
                }
                debug!(file = %file_name, documents = loaded.documents.len(), "Wrote documents");
                file_reports.push(FileReport {
                    name: file_name.clone(),
                    documents_written: loaded.documents.len(),
                    skipped: false,
                    dropped_tags: loaded.dropped_tags,
                });
            }

            directories.push(DirectoryReport {
                path: dir_name.clone(),
                files: file_reports,
            });
        }

        Ok((directories, skipped))
    }
}

/// Merge `root` into `output` with default options.
pub fn merge(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Result<MergeReport, MergeError> {
    Merger::new(MergeOptions::new(root, output)).run()
}

fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
