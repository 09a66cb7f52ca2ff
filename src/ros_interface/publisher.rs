use r2r::QosProfile;

use crate::{PlannerError, PlannerResult};

/// Generic ROS2 Publisher wrapper
pub struct Publisher<T>
where
    T: r2r::WrappedTypesupport,
{
    inner: r2r::Publisher<T>,
    topic: String,
}

impl<T> Publisher<T>
where
    T: r2r::WrappedTypesupport + 'static,
{
    /// Create a new publisher on the given topic with specified QoS
    pub fn new(node: &mut r2r::Node, topic: &str, qos: QosProfile) -> PlannerResult<Self> {
        let publisher = node.create_publisher::<T>(topic, qos)?;
        Ok(Publisher {
            inner: publisher,
            topic: topic.to_string(),
        })
    }

    /// Publish a message to the topic
    pub fn publish(&self, message: &T) -> PlannerResult<()> {
        self.inner
            .publish(message)
            .map_err(|e| PlannerError::PublishError(format!("{}: {}", self.topic, e)))
    }
}
