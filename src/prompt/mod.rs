//! Remediation prompt generation.
//!
//! When a run is not clean, renders a markdown document mirroring the
//! result categories so a maintainer (or an LLM) can work through the
//! findings. Pure function of the validation result.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::validator::ValidationResult;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

/// Template context for the remediation prompt.
/// Placeholders: {{generated_at}}, counts, {{errors}}, {{orphaned_files}},
/// {{missing_files}}, {{broken_links}}
#[derive(Debug, Clone, Serialize)]
struct PromptContext {
    generated_at: String,
    template_count: usize,
    orphaned_count: usize,
    missing_count: usize,
    broken_link_count: usize,
    inconsistency_count: usize,
    error_count: usize,
    errors: Vec<String>,
    orphaned_files: Vec<String>,
    missing_files: Vec<MissingFileEntry>,
    broken_links: Vec<BrokenLinkEntry>,
}

#[derive(Debug, Clone, Serialize)]
struct MissingFileEntry {
    path: String,
    referenced_in: String,
}

#[derive(Debug, Clone, Serialize)]
struct BrokenLinkEntry {
    location: String,
    url: String,
    reason: String,
}

const PROMPT_TEMPLATE: &str = "\
# Genesis Validation Failed

The template validator has detected inconsistencies that need to be fixed.

Generated: {{generated_at}}

## Validation Summary

- **Template files found**: {{template_count}}
- **Orphaned files**: {{orphaned_count}}
- **Missing files**: {{missing_count}}
- **Broken links**: {{broken_link_count}}
- **Inconsistencies**: {{inconsistency_count}}
- **Errors**: {{error_count}}
{{#if errors}}
## Critical Errors

{{#each errors}}
- {{{this}}}
{{/each}}
{{/if}}
{{#if orphaned_files}}
## Orphaned Template Files

These template files exist but are NOT referenced in START-HERE.md:

{{#each orphaned_files}}
- `{{{this}}}`
{{/each}}

**Action Required**: For each orphaned file, decide:
- **Option 1**: Add to START-HERE.md Section 3 (if MANDATORY or RECOMMENDED)
- **Option 2**: Add to START-HERE.md Section 3.7 (if OPTIONAL)
- **Option 3**: Remove the file (if obsolete)
{{/if}}
{{#if missing_files}}
## Missing Template Files

These files are referenced in documentation but DO NOT exist:

{{#each missing_files}}
- `{{{path}}}` (referenced in: {{{referenced_in}}})
{{/each}}

**Action Required**: For each missing file:
- **Option 1**: Create the template file
- **Option 2**: Remove references from documentation (if obsolete)
{{/if}}
{{#if broken_links}}
## Broken Links

{{#each broken_links}}
- {{{location}}}: [{{{url}}}] {{{reason}}}
{{/each}}
{{/if}}

## Recommended Actions

1. **Review all orphaned files** - Add to START-HERE.md or remove
2. **Fix missing files** - Create templates or remove references
3. **Run validator again** - Verify all issues are resolved
4. **Update CHANGELOG.md** - Document what was fixed

## Example Fix

```bash
# For orphaned file: templates/web-app/new-feature-template.js
# Add to START-HERE.md Section 3.2:
cp genesis/templates/web-app/new-feature-template.js js/new-feature.js
```

---

**Run this command to validate again**:
```bash
genesis-validator
```
";

/// Generates remediation prompts for validation issues.
pub struct PromptGenerator {
    handlebars: Handlebars<'static>,
}

impl PromptGenerator {
    pub fn new() -> Self {
        let handlebars = Handlebars::new();
        Self { handlebars }
    }

    /// Render the remediation prompt for a result.
    ///
    /// Returns an empty string when the result is clean.
    pub fn generate(&self, result: &ValidationResult) -> Result<String, PromptError> {
        if result.is_valid() && !result.has_warnings() {
            return Ok(String::new());
        }

        let context = PromptContext {
            generated_at: chrono::Utc::now().to_rfc3339(),
            template_count: result.template_files.len(),
            orphaned_count: result.orphaned_files.len(),
            missing_count: result.missing_files.len(),
            broken_link_count: result.broken_links.len(),
            inconsistency_count: result.inconsistencies.len(),
            error_count: result.errors.len(),
            errors: result.errors.clone(),
            orphaned_files: result.orphaned_files.clone(),
            missing_files: result
                .missing_files
                .iter()
                .map(|path| MissingFileEntry {
                    path: path.clone(),
                    referenced_in: result
                        .referenced_files
                        .get(path)
                        .map(|docs| docs.join(", "))
                        .unwrap_or_default(),
                })
                .collect(),
            broken_links: result
                .broken_links
                .iter()
                .map(|link| BrokenLinkEntry {
                    location: format!("{}:{}", link.source_file, link.line),
                    url: link.link_url.clone(),
                    reason: link.reason.clone(),
                })
                .collect(),
        };

        self.handlebars
            .render_template(PROMPT_TEMPLATE, &context)
            .map_err(PromptError::from)
    }
}

impl Default for PromptGenerator {
    fn default() -> Self {
        Self::new()
    }
}
