//! Generation pipeline shared by the consultation handlers.
//!
//! Resolves the scenario, looks up its reference document, assembles the
//! prompt and calls the provider. It never touches the session.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::reference_cache::ReferenceDocumentCache;
use crate::domain::consultation::Session;
use crate::domain::knowledge::KnowledgeBase;
use crate::domain::prompt::{PromptAssembler, PromptTask};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, GenerationOptions, ReferenceSource, RequestMetadata,
};

/// Prompt assembly plus one provider call.
pub struct GenerationPipeline<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    provider: Arc<P>,
    references: Arc<ReferenceDocumentCache<S>>,
    knowledge: Arc<KnowledgeBase>,
    assembler: PromptAssembler,
    options: GenerationOptions,
}

impl<P, S> GenerationPipeline<P, S>
where
    P: ?Sized + AIProvider,
    S: ?Sized + ReferenceSource,
{
    pub fn new(
        provider: Arc<P>,
        references: Arc<ReferenceDocumentCache<S>>,
        knowledge: Arc<KnowledgeBase>,
    ) -> Self {
        Self {
            provider,
            references,
            knowledge,
            assembler: PromptAssembler::default(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_assembler(mut self, assembler: PromptAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// Generates text for `task` from the session as given.
    ///
    /// Callers pass a working copy that already holds the new input (the
    /// attached profile, the pending question).
    pub async fn generate(&self, task: PromptTask, session: &Session) -> Result<String, AIError> {
        let scenario = self.knowledge.resolve(session.scenario());
        let reference = self.references.get(scenario).await;
        let prompt = self
            .assembler
            .assemble(task, session, &self.knowledge, &reference);

        let trace_id = Uuid::new_v4().to_string();
        tracing::debug!(
            %task,
            scenario = %scenario.id,
            prompt_chars = prompt.chars().count(),
            reference_available = reference.is_available(),
            trace_id = %trace_id,
            "assembled prompt"
        );

        let request = CompletionRequest::new(prompt, RequestMetadata::new(task, trace_id.clone()))
            .with_options(self.options);

        let response = self.provider.complete(request).await.map_err(|err| {
            tracing::warn!(%task, trace_id = %trace_id, error = %err, "generation failed");
            err
        })?;

        tracing::info!(
            %task,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            trace_id = %trace_id,
            "generation complete"
        );
        Ok(response.content)
    }
}
