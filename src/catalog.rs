//! Static epic → subtask catalog for the Mycelia project board.
//!
//! Hand-authored, insertion-ordered, and never mutated at runtime. The
//! synchronizer walks this catalog top to bottom, so board ordering follows
//! declaration order here.

/// A top-level tracked unit of work and its subtasks.
#[derive(Debug, Clone, Copy)]
pub struct Epic {
    /// Epic name; the epic issue is titled `Epic: <name>`.
    pub name: &'static str,
    /// Subtask descriptions, each becoming its own issue linked under the epic.
    pub subtasks: &'static [&'static str],
}

/// The full task catalog, in board insertion order.
pub const TASK_CATALOG: &[Epic] = &[
    Epic {
        name: "Core System Foundations",
        subtasks: &[
            "Initialize Git repository and monorepo layout with essential directories and files.",
            "Create base docker-compose.yml with core services: NATS JetStream, Dapr placement service, Prometheus, Grafana.",
            "Add Makefile and .env.example for local bootstrapping and developer setup.",
            "Create Dapr component definitions for pubsub, state, and bindings.",
            "Implement first agent (agent_hello) using FastAPI + Dapr pubsub to validate local message routing.",
            "Set up .github folder with CI/CD scaffolding and GitHub Actions for linting and container builds.",
            "Configure Prometheus scraping and basic Grafana dashboards for agent health and message throughput.",
        ],
    },
    Epic {
        name: "Agent SDK and Runtime Development",
        subtasks: &[
            "Scaffold agent_runtime base Python module to be shared across all agents.",
            "Implement pluggable adapters for pubsub, state backend, MCP interface, and health ping.",
            "Enable agent runtime to support both Dapr and direct NATS interaction interchangeably.",
            "Add agent registration with a centralized tool registry for publishing tool info and health.",
            "Add startup lifecycle hooks for tool registration, logging, and state initialization.",
            "Implement CLI subcommand: `mycelia agent init <name>` to generate an agent skeleton.",
            "Ensure CLI supports local development mode with hot-reload via uvicorn.",
            "Document adapter API and usage for external agents.",
        ],
    },
    Epic {
        name: "Initial Agent Implementations",
        subtasks: &[
            "Create daily_briefing agent to fetch calendar events, news, summarize with LLM, and store reports.",
            "Create spotify_sync agent to sync Last.fm scrobbles with Spotify playlists and store sync stats.",
            "Create echo_bot agent to reply to messages with basic metadata for pubsub/debug testing.",
            "Create tool_registry agent to manage tool registration, health info, and discovery endpoints.",
        ],
    },
    Epic {
        name: "Supabase Integration",
        subtasks: &[
            "Design Supabase schema for users, agents, tasks, workflows, registry, and job logs.",
            "Configure Supabase authentication via access token and session refresh.",
            "Integrate Supabase client into agents for task tracking and state persistence.",
            "Support Realtime subscriptions for frontend logs and events.",
            "Add connector support for bring-your-own Postgres deployments.",
            "Validate schema migration flow for local and production environments.",
        ],
    },
    Epic {
        name: "MCP Protocol Support",
        subtasks: &[
            "Install and configure `fastapi-mcp` in agent_runtime.",
            "Define /tools endpoint with dynamic registration via decorators.",
            "Implement /execute endpoint to run tool functions via REST or pubsub.",
            "Ensure agents broadcast MCP tool metadata to the registry.",
            "Add MCP metadata support for tool schemas, output types, and permissions.",
            "Build MCP message router for orchestrator to trigger distributed tool execution.",
        ],
    },
    Epic {
        name: "Observability Enhancements",
        subtasks: &[
            "Define scrape targets in Prometheus for Dapr, NATS, and all agents.",
            "Create Grafana dashboards for agent uptime, pubsub latency, and workflow execution time.",
            "Add structured logging to agent_runtime with correlation IDs.",
            "Implement status heartbeat messages from agents to tool_registry.",
            "Expose OpenTelemetry traces from each agent (optional).",
        ],
    },
    Epic {
        name: "Workflow Engine Development",
        subtasks: &[
            "Design a YAML-based schema for declarative workflows.",
            "Support sequential and parallel task execution.",
            "Enable step chaining with output forwarding between tools.",
            "Implement execution engine via Dapr workflows or internal orchestrator.",
            "Add retry policies and timeout configuration per step.",
            "Store workflow run state in Supabase and display logs in the frontend.",
            "Build a library of reusable workflows like daily_sync.yaml and summarize_docs.yaml.",
        ],
    },
    Epic {
        name: "Frontend MVP Development",
        subtasks: &[
            "Initialize React project with Tailwind, shadcn/ui, and Supabase auth.",
            "Build login/register screen and session management.",
            "Create dashboard to list agents, their tools, and current status.",
            "Develop task manager to run tasks, see results, and monitor status.",
            "Implement workflow editor to choose steps and trigger via UI.",
            "Add logs/events stream via Supabase Realtime or WebSocket.",
            "Create agent registration UI and tool manifest browser.",
        ],
    },
    Epic {
        name: "Infrastructure and Connector Support",
        subtasks: &[
            "Define YAML-based connector plugin spec for agents and tools.",
            "Support pluggable state backends like Supabase, Redis, CosmosDB, and Postgres.",
            "Support pluggable vector stores like Pinecone, Qdrant, and Weaviate.",
            "Add support for external graph databases like Neo4J, Dgraph, and TerminusDB.",
            "Define override configurations in infra-profiles for Azure, bare-metal, etc.",
            "Test swapping default Dapr/Supabase config with user-supplied components.",
        ],
    },
    Epic {
        name: "Developer Experience and CLI Tooling",
        subtasks: &[
            "Add `mycelia init` to scaffold agents, tools, connectors, and workflows.",
            "Add `mycelia run agent` with development mode, hot reload, and port watcher.",
            "Add `mycelia workflow run` to test workflows locally.",
            "Support `.mycelia` config file for local development profiles.",
            "Build plugin loader to extend CLI with custom commands.",
            "Integrate CLI with GitHub repo and project board auto-linking.",
        ],
    },
    Epic {
        name: "Release v1.0 Tasks",
        subtasks: &[
            "Implement CI/CD pipeline using GitHub Actions for linting, testing, building, and image pushing.",
            "Push agent images to GitHub Container Registry.",
            "Secure agent-to-agent and CLI-to-agent communication using token authentication.",
            "Write developer documentation, API docs, and CLI reference.",
            "Publish landing page and quickstart guide on mycelia.dev.",
            "Enable issue templates and GitHub Projects automation.",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(TASK_CATALOG.len(), 11);
        assert_eq!(TASK_CATALOG[0].name, "Core System Foundations");
        assert_eq!(TASK_CATALOG[0].subtasks.len(), 7);
        assert_eq!(TASK_CATALOG[10].name, "Release v1.0 Tasks");
    }

    #[test]
    fn test_catalog_entries_nonempty() {
        for epic in TASK_CATALOG {
            assert!(!epic.name.is_empty());
            assert!(!epic.subtasks.is_empty(), "epic '{}' has no subtasks", epic.name);
            for task in epic.subtasks {
                assert!(!task.is_empty());
            }
        }
    }
}
