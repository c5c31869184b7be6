use alloy::sol;

// Generate bindings around the SSV Network contract calls used during onboarding
sol! {
    #[derive(Debug)]
    contract SSVNetwork {
        function addOperator(string name, address ownerAddress, bytes publicKey) external;
        function registerOperator(string name, bytes publicKey, uint256 fee) external;
        function addValidator(
            address ownerAddress,
            bytes publicKey,
            bytes[] operatorPublicKeys,
            bytes[] sharesPublicKeys,
            bytes[] encryptedKeys
        ) external;
        function registerValidator(
            bytes publicKey,
            bytes[] operatorPublicKeys,
            bytes[] sharesPublicKeys,
            bytes[] encryptedKeys,
            uint256 amount
        ) external;
        function getOperatorCurrentFee(bytes publicKey) external view returns (uint256);
        function validatorsPerOperatorLimit() external view returns (uint256);
        function validatorsPerOperatorCount(bytes publicKey) external view returns (uint256);
        function operators(bytes publicKey) external view returns (
            string name,
            address ownerAddress,
            bytes operatorPublicKey,
            uint256 score,
            bool active,
            uint256 index
        );
    }
}
