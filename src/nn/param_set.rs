/*
 * @Description  : 可训练参数的有序集合。参数通过本集合在图中声明，
 *                 训练时的梯度范数、动量缓冲都按这里的声明顺序一一对应
 */

use super::{Graph, GraphError, NodeId};

#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    entries: Vec<(String, NodeId)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在图中声明一个形状为`shape`的参数节点（值与梯度均为0），并按顺序登记
    pub fn declare(
        &mut self,
        graph: &mut Graph,
        name: &str,
        shape: &[usize],
    ) -> Result<NodeId, GraphError> {
        let id = graph.new_parameter_node(shape, Some(name))?;
        self.entries.push((name.to_string(), id));
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|&(_, id)| id)
    }

    /// 按声明顺序返回所有参数id
    pub fn ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|&(_, id)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
