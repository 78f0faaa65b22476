use std::collections::HashMap;

use hrdesk_core::{AppResult, UserIdentity};
use hrdesk_domain::{
    PermissionAction, TaskAssignment, TaskBoard, TaskCard, TaskFilter, TaskId,
    can_perform_action, sort_task_cards,
};

use super::TaskService;
use crate::Actor;

impl TaskService {
    /// Lists tasks the caller can view that pass the filter, ordered by due
    /// date (undated last) and then creation time.
    pub async fn list_tasks(
        &self,
        identity: &UserIdentity,
        filter: &TaskFilter,
    ) -> AppResult<Vec<TaskCard>> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let mut cards = self.visible_cards(&actor).await?;
        cards.retain(|card| filter.matches(card));
        sort_task_cards(&mut cards);
        Ok(cards)
    }

    /// Returns one task with its assignees.
    pub async fn get_task(&self, identity: &UserIdentity, task_id: TaskId) -> AppResult<TaskCard> {
        self.authorize_card(identity, task_id, PermissionAction::View)
            .await
    }

    /// Groups the visible tasks into the six status columns.
    pub async fn board(&self, identity: &UserIdentity) -> AppResult<TaskBoard> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let mut cards = self.visible_cards(&actor).await?;
        sort_task_cards(&mut cards);
        Ok(TaskBoard::from_tasks(cards.into_iter().map(|card| card.task)))
    }

    async fn visible_cards(&self, actor: &Actor) -> AppResult<Vec<TaskCard>> {
        let matrix = self.authorization_service.load_matrix().await?;
        let tasks = self.tasks.list_tasks().await?;
        let task_ids: Vec<TaskId> = tasks.iter().map(|task| task.task_id()).collect();

        let mut assignments_by_task: HashMap<TaskId, Vec<TaskAssignment>> = HashMap::new();
        for assignment in self.tasks.list_assignments(&task_ids).await? {
            assignments_by_task
                .entry(assignment.task_id)
                .or_default()
                .push(assignment);
        }

        Ok(tasks
            .into_iter()
            .map(|task| TaskCard {
                assignments: assignments_by_task
                    .remove(&task.task_id())
                    .unwrap_or_default(),
                task,
            })
            .filter(|card| {
                can_perform_action(
                    &actor.context,
                    PermissionAction::View,
                    Some(&card.target()),
                    &matrix,
                )
            })
            .collect())
    }
}
