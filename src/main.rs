//! pkgsmith's main application entry point.
//! Parses the command line and dispatches to generation, documentation or
//! pipeline configuration.

use std::path::Path;

use pkgsmith::{
    cli::{get_args, Args, Command},
    docs::{CommandDocGenerator, DocGenerator},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    pipeline::{resolve_icon, write_pipeline_config, PipelineFactory},
    processor::Processor,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn doc_generator(processor: &Processor, project_dir: &Path) -> Result<CommandDocGenerator> {
    let section = processor.descriptor().docs.as_ref().ok_or_else(|| {
        Error::ConfigError("no 'docs' section in the project descriptor".to_string())
    })?;
    Ok(CommandDocGenerator::from_section(section, project_dir))
}

fn run(args: Args) -> Result<()> {
    let renderer = MiniJinjaRenderer::new();

    match args.command {
        Command::Generate { project_dir, with_docs } => {
            let processor = Processor::new(&renderer, &project_dir)?;
            let generator =
                if with_docs { Some(doc_generator(&processor, &project_dir)?) } else { None };

            let summary = processor.run(generator.as_ref().map(|g| g as &dyn DocGenerator))?;
            for path in &summary.rendered {
                println!("Rendered: '{}'", path.display());
            }
            for path in &summary.copied {
                println!("Copied: '{}'", path.display());
            }
            if summary.docs_generated {
                println!("Documentation generated.");
            }
            println!("Scaffold regenerated successfully in {}.", project_dir.display());
        }
        Command::Docs { project_dir } => {
            let processor = Processor::new(&renderer, &project_dir)?;
            processor.generate_docs(&doc_generator(&processor, &project_dir)?)?;
            println!("Documentation generated.");
        }
        Command::Pipeline { name, icon, folders, no_standalone, project_dir } => {
            let mut factory = PipelineFactory::browser_app(name, resolve_icon(&project_dir, &icon));
            factory.standalone = !no_standalone;
            if !folders.is_empty() {
                factory.packaged_folders = folders;
            }
            write_pipeline_config(&factory, &mut std::io::stdout().lock())?;
        }
    }
    Ok(())
}
