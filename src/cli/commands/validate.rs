//! Validate command implementation
//!
//! Loads the manifest and resolves both capabilities for every field, so
//! conflicting or unresolvable markers surface before the manifest is used.

use crate::config::load_manifest;
use crate::factory::ObjectFactory;
use crate::log_field_error;
use crate::markers::AnnotatedElement;
use crate::registry::ProviderRegistry;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Returns exit code 0 when every field resolves and 2 otherwise.
    pub fn execute(&self, manifest_path: &str, registry: &ProviderRegistry) -> anyhow::Result<i32> {
        tracing::info!(manifest_path = %manifest_path, "Validating manifest");

        println!("🔍 Validating manifest: {manifest_path}");
        println!();

        let manifest = match load_manifest(manifest_path, registry) {
            Ok(m) => {
                println!("✅ Manifest loaded successfully");
                m
            }
            Err(e) => {
                println!("❌ Failed to load manifest");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Fields:");
        let mut failures = 0;
        for element in manifest.elements() {
            match describe(element, registry) {
                Ok(summary) => println!("  ✅ {}: {summary}", element.name()),
                Err(e) => {
                    log_field_error!(element.name(), &e);
                    println!("  ❌ {}: {e}", element.name());
                    failures += 1;
                }
            }
        }
        println!();

        if failures == 0 {
            println!("✅ All {} fields resolved", manifest.elements().len());
            Ok(0)
        } else {
            println!("❌ {failures} of {} fields failed to resolve", manifest.elements().len());
            Ok(2)
        }
    }
}

/// Resolves both capabilities of a field into a one-line summary
fn describe(element: &AnnotatedElement, factory: &impl ObjectFactory) -> crate::domain::Result<String> {
    let obfuscator = factory.obfuscator(element)?;
    let representation = factory.representation(element)?;

    let obfuscator = obfuscator.map_or_else(|| "none declared".to_string(), |o| format!("{o:?}"));
    let representation =
        representation.map_or_else(|| "default".to_string(), |r| format!("{r:?}"));
    Ok(format!("obfuscator = {obfuscator}, representation = {representation}"))
}
