use anyhow::{anyhow, Context, Result};

use doge_composer::cli::{CliArgs, Step};
use doge_composer::config::ComposerConfig;
use doge_composer::model::{Composition, Element};
use doge_composer::notifications::{Notification, Topic};
use doge_composer::runtime::Composer;

fn main() -> Result<()> {
    doge_composer::tracing::init();

    let session = CliArgs::parse_ordered().into_session().map_err(|e| anyhow!(e))?;

    let config = match &session.config {
        Some(path) => ComposerConfig::load_from(path),
        None => ComposerConfig::load(),
    };
    let composition = match &session.composition {
        Some(path) => Composition::from_file(path)?,
        None => Composition::new(vec![Element::new("profile_header")]),
    };

    let mut composer = Composer::with_config(composition, config);
    composer.subscribe(Topic::ToolbeltShown, |n| {
        if let Notification::ToolbeltShown {
            toolbelt_id,
            container_id,
        } = n
        {
            println!("toolbelt-popup-shown {} (container {})", toolbelt_id, container_id);
        }
    });
    composer.subscribe(Topic::ValueChange, |n| {
        if let Notification::ValueChange {
            for_element,
            edit_name,
        } = n
        {
            println!("value-change {} on {}", edit_name, for_element);
        }
    });

    for step in session.steps {
        run_step(&mut composer, step)?;
    }

    let model = composer.model();
    println!("{}", model.dom.outline(model.layout.root));
    match composer.active_toolbelt() {
        Some(toolbelt) => {
            let options: Vec<&str> = toolbelt.options.iter().map(|v| v.option.as_str()).collect();
            println!(
                "active toolbelt: {} on {} [{}]",
                toolbelt.id(),
                toolbelt.edit_name(),
                options.join(", ")
            );
        }
        None => println!("active toolbelt: none"),
    }
    if let Some(invocation) = &model.last_invocation {
        println!("last invocation: {} on {}", invocation.option, invocation.target);
    }
    println!(
        "{}",
        composer
            .working()
            .to_json_pretty()
            .context("Failed to serialize working data")?
    );

    Ok(())
}

fn run_step(composer: &mut Composer, step: Step) -> Result<()> {
    match step {
        Step::ClickRegion(name) => {
            let node = composer
                .region_node(&name)
                .ok_or_else(|| anyhow!("No editable region named '{}'", name))?;
            composer.click(node);
        }
        Step::ClickOption(key) => {
            let node = composer
                .option_node(&key)
                .ok_or_else(|| anyhow!("Option '{}' is not in the active toolbelt", key))?;
            composer.click(node);
        }
        Step::Input { option, value } => {
            let node = composer
                .option_node(option.as_str())
                .ok_or_else(|| anyhow!("Option '{}' is not in the active toolbelt", option))?;
            composer.input(node, &value);
        }
    }
    Ok(())
}
