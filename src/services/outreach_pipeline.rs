use std::{sync::Arc, time::Duration};

use sqlx::PgPool;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::configuration::ResearchSettings;
use crate::dal::output_db;
use crate::domain::{Company, CompletionResponse, OutputRecord, OutreachStatus, Strategy};

use super::{Personalizer, ResultCache, StrategyResolver};

/// One queued personalization run, taken off the intake route.
#[derive(Debug)]
pub struct RunRequest {
    pub run_id: Uuid,
    pub companies: Vec<Company>,
    pub strategies: Vec<Strategy>,
    pub message_template: String,
    pub master_prompt: String,
}

pub struct RunRequestSender {
    pub sender: UnboundedSender<RunRequest>,
}

/// Research-then-personalize for a single company: consult the cache, resolve
/// on a miss, then turn a found fact into an outreach message. Always yields
/// a record, never an error.
pub struct CompanyPipeline {
    resolver: StrategyResolver,
    cache: Arc<dyn ResultCache>,
    personalizer: Arc<dyn Personalizer>,
    settings: ResearchSettings,
}

impl CompanyPipeline {
    pub fn new(
        resolver: StrategyResolver,
        cache: Arc<dyn ResultCache>,
        personalizer: Arc<dyn Personalizer>,
        settings: ResearchSettings,
    ) -> Self {
        CompanyPipeline {
            resolver,
            cache,
            personalizer,
            settings,
        }
    }

    pub async fn process(
        &self,
        company: &Company,
        strategies: &[Strategy],
        message_template: &str,
        master_prompt: &str,
    ) -> OutputRecord {
        let outcome = match self.cache.get(&company.name).await {
            Some(outcome) => {
                log::info!("Cache hit for {}", company.name);
                outcome
            }
            None => {
                let outcome = self.resolver.resolve(company, strategies).await;
                if outcome.found || self.settings.cache_failed_resolutions {
                    self.cache.put(&company.name, &outcome).await;
                }
                outcome
            }
        };

        let (status, personalized_message) = match &outcome.fact {
            Some(fact) => {
                let prompt =
                    render_personalization_prompt(master_prompt, message_template, fact, company);
                match self.personalizer.personalize(&prompt).await {
                    CompletionResponse::Text(message) => (OutreachStatus::Personalized, message),
                    CompletionResponse::Refusal => {
                        log::info!("Personalizer refused for {}", company.name);
                        (OutreachStatus::PersonalizationFailed, String::new())
                    }
                    CompletionResponse::Error(e) => {
                        log::error!("Personalization failed for {}: {}", company.name, e);
                        (OutreachStatus::PersonalizationFailed, String::new())
                    }
                }
            }
            None => (OutreachStatus::NoSourceFound, String::new()),
        };

        OutputRecord {
            linkedin_url: company.linkedin_url.clone().unwrap_or_default(),
            website_url: company.website_url.clone().unwrap_or_default(),
            company_name: company.name.clone(),
            fact: outcome.fact.clone().unwrap_or_default(),
            source_url: outcome.source_url.clone().unwrap_or_default(),
            message_template: message_template.to_string(),
            personalized_message,
            status,
        }
    }
}

/// The master prompt drives the message model. `{company}` and `{domain}`
/// are always substituted; `{template}`/`{fact}` are substituted when the
/// prompt carries them, otherwise both are appended in a fixed block.
pub fn render_personalization_prompt(
    master_prompt: &str,
    message_template: &str,
    fact: &str,
    company: &Company,
) -> String {
    let domain = company.root_domain().unwrap_or_default();
    let rendered = master_prompt
        .replace("{company}", &company.name)
        .replace("{domain}", &domain);

    match master_prompt.contains("{fact}") || master_prompt.contains("{template}") {
        true => rendered
            .replace("{template}", message_template)
            .replace("{fact}", fact),
        false => format!(
            "{}\n\nHere is the base message template to start with:\n'{}'\n\nHere is the research summary you must incorporate:\n'{}'",
            rendered, message_template, fact
        ),
    }
}

pub async fn run_request_handler(
    mut run_request_receiver: UnboundedReceiver<RunRequest>,
    pipeline: CompanyPipeline,
    pool: PgPool,
) {
    log::info!("Started outreach run handler");

    while let Some(request) = run_request_receiver.recv().await {
        log::info!(
            "Outreach run handler has {} elements",
            run_request_receiver.len()
        );

        let total = request.companies.len();
        for (position, company) in request.companies.iter().enumerate() {
            if company.name.trim().is_empty() {
                log::info!("[{}/{}] Skipping row with no company name", position + 1, total);
                continue;
            }

            log::info!("[{}/{}] Processing: {}", position + 1, total, company.name);
            let record = pipeline
                .process(
                    company,
                    &request.strategies,
                    &request.message_template,
                    &request.master_prompt,
                )
                .await;

            if let Err(e) =
                output_db::insert_output_record(&pool, request.run_id, position as i32, &record)
                    .await
            {
                log::error!("Failed to persist record for {}: {:?}", company.name, e);
            }

            if position + 1 < total {
                tokio::time::sleep(Duration::from_secs(
                    pipeline.settings.company_delay_secs,
                ))
                .await;
            }
        }

        log::info!("Run {} complete", request.run_id);
    }
}
