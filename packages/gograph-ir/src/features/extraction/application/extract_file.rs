//! Parse + visit one file

use crate::features::extraction::domain::FileExtraction;
use crate::features::extraction::infrastructure::FileVisitor;
use crate::features::parsing::infrastructure::GoParser;
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::Result;

/// Extract the declarations of one Go file
///
/// `package` is the owning package path, `rel_path` the module-relative
/// file path. Fails only when the parse step rejects the source.
pub fn extract_file(package: &str, rel_path: &str, source: String) -> Result<FileExtraction> {
    extract_file_with(&GoParser::new(), package, rel_path, source)
}

/// `extract_file` with an explicit parse step
pub fn extract_file_with(
    parser: &dyn SourceParser,
    package: &str,
    rel_path: &str,
    source: String,
) -> Result<FileExtraction> {
    let tree = parser.parse(source, rel_path)?;
    Ok(FileVisitor::new(&tree, package, rel_path).visit())
}
